use evolve_core::SdkResult;

/// Where a transaction ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxOutcome {
    /// The ante chain failed; nothing the transaction did was kept.
    AnteRejected,
    /// A message failed; message changes were discarded, the post chain ran.
    ExecutionFailed,
    /// The post chain failed; message and post changes were discarded.
    PostRejected,
    Success,
}

#[derive(Debug)]
pub struct TxResult {
    pub response: SdkResult<()>,
    pub outcome: TxOutcome,
}

impl TxResult {
    pub fn is_success(&self) -> bool {
        self.outcome == TxOutcome::Success
    }
}

#[derive(Debug)]
pub struct BlockResult {
    pub tx_results: Vec<TxResult>,
}

impl BlockResult {
    pub fn succeeded(&self) -> usize {
        self.tx_results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.tx_results.len() - self.succeeded()
    }
}
