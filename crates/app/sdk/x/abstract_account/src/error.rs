use evolve_core::define_error;

define_error!(
    ERR_TX_DECODE,
    0x01,
    "transaction does not expose signers and signatures"
);
define_error!(ERR_SIGNER_NOT_FOUND, 0x02, "signer account not found");
define_error!(
    ERR_NOT_SINGLE_SIGNATURE,
    0x03,
    "signature is not a single-credential signature"
);
// arg carries the id of the error returned by the contract
define_error!(
    ERR_CONTRACT_INVOCATION,
    0x40,
    "account contract call failed with error {arg}"
);
