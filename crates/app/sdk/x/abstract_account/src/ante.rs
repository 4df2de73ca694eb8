use crate::account::{AccountKeeper, ContractKeeper};
use crate::classify::{classify, Classification, Qualified};
use crate::credentials::prepare_credentials;
use crate::error::ERR_CONTRACT_INVOCATION;
use crate::handoff::SignerHandoff;
use crate::msg::{AccountSudoMsg, BeforeTx, Binary};
use crate::params::AbstractAccountParams;
use crate::transcode::transcode_msgs;
use evolve_core::SdkResult;
use evolve_stf_traits::{
    AnteDecorator, AnteHandler, DirectSignModeHandler, SignModeHandler, Transaction, TxContext,
};
use tracing::{debug, warn};

/// Ante decorator authenticating contract-account transactions through the account's
/// contract.
///
/// A transaction with exactly one signer and one signature whose signer is a contract
/// account is handed to that contract as a `before_tx` sudo call. Every other
/// transaction goes to `default_verifier` untouched, which takes over the rest of the
/// chain.
pub struct BeforeTxDecorator<D, A, C, H = DirectSignModeHandler> {
    default_verifier: D,
    accounts: A,
    contracts: C,
    sign_mode_handler: H,
    params: AbstractAccountParams,
}

impl<D, A, C> BeforeTxDecorator<D, A, C> {
    pub fn new(default_verifier: D, accounts: A, contracts: C) -> Self {
        Self {
            default_verifier,
            accounts,
            contracts,
            sign_mode_handler: DirectSignModeHandler,
            params: AbstractAccountParams::default(),
        }
    }
}

impl<D, A, C, H> BeforeTxDecorator<D, A, C, H> {
    pub fn with_sign_mode_handler<H2>(
        self,
        sign_mode_handler: H2,
    ) -> BeforeTxDecorator<D, A, C, H2> {
        BeforeTxDecorator {
            default_verifier: self.default_verifier,
            accounts: self.accounts,
            contracts: self.contracts,
            sign_mode_handler,
            params: self.params,
        }
    }

    pub fn with_params(mut self, params: AbstractAccountParams) -> Self {
        self.params = params;
        self
    }
}

impl<Tx, D, A, C, H> AnteDecorator<Tx> for BeforeTxDecorator<D, A, C, H>
where
    Tx: Transaction + ?Sized,
    D: AnteDecorator<Tx>,
    A: AccountKeeper,
    C: ContractKeeper,
    H: SignModeHandler,
{
    fn ante_handle(
        &self,
        ctx: &mut TxContext<'_>,
        tx: &Tx,
        simulate: bool,
        next: &dyn AnteHandler<Tx>,
    ) -> SdkResult<()> {
        let Qualified {
            tx: sig_tx,
            account,
            signature,
        } = match classify(ctx.env(), tx, &self.accounts)? {
            Classification::NotApplicable => {
                debug!("not a contract account transaction, using default verification");
                return self
                    .default_verifier
                    .ante_handle(ctx, tx, simulate, next)
                    .inspect_err(|err| {
                        warn!(%err, "transaction rejected on the default verification path");
                    });
            }
            Classification::Qualifies(qualified) => qualified,
        };

        // must precede every external call
        ctx.write(account.address.clone());

        let credentials = prepare_credentials(
            ctx,
            sig_tx,
            &account,
            &signature,
            &self.sign_mode_handler,
            &self.params,
        )?;
        let request = AccountSudoMsg::BeforeTx(BeforeTx {
            msgs: transcode_msgs(tx.msgs())?,
            sign_bytes: Binary(credentials.sign_bytes),
            signature: Binary(credentials.signature),
        })
        .to_json_vec()?;

        debug!(signer = %account.address, "calling before_tx");
        self.contracts
            .sudo(ctx.env_mut(), &account.address, &request)
            .map_err(|err| {
                warn!(signer = %account.address, %err, "before_tx rejected transaction");
                ERR_CONTRACT_INVOCATION.with_arg(err.id)
            })?;

        next.handle(ctx, tx, simulate)
    }
}
