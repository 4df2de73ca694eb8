use crate::errors::{ERR_DUPLICATE_HANDLER, ERR_NO_HANDLER};
use evolve_core::encoding::Decodable;
use evolve_core::{Environment, SdkResult};
use evolve_stf_traits::{AnyMsg, Transaction, TxExecutor, TxMsg, TypeUrl};
use std::collections::BTreeMap;
use tracing::trace;

type MsgHandler = Box<dyn Fn(&AnyMsg, &mut dyn Environment) -> SdkResult<()>>;

/// Executes transaction messages by dispatching each one on its type URL.
///
/// Messages run in order; the first failure stops the transaction.
#[derive(Default)]
pub struct MsgRouter {
    handlers: BTreeMap<&'static str, MsgHandler>,
}

impl MsgRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<M>(
        &mut self,
        handler: impl Fn(&M, &mut dyn Environment) -> SdkResult<()> + 'static,
    ) -> SdkResult<()>
    where
        M: TypeUrl + Decodable + 'static,
    {
        if self.handlers.contains_key(M::TYPE_URL) {
            return Err(ERR_DUPLICATE_HANDLER);
        }
        self.handlers.insert(
            M::TYPE_URL,
            Box::new(move |any: &AnyMsg, env: &mut dyn Environment| {
                handler(&any.unpack::<M>()?, env)
            }),
        );
        Ok(())
    }

    pub fn route(&self, msg: &dyn TxMsg, env: &mut dyn Environment) -> SdkResult<()> {
        let handler = self.handlers.get(msg.type_url()).ok_or(ERR_NO_HANDLER)?;
        trace!(type_url = msg.type_url(), "routing message");
        handler(&msg.to_any()?, env)
    }
}

impl<Tx: Transaction + ?Sized> TxExecutor<Tx> for MsgRouter {
    fn execute(&self, tx: &Tx, env: &mut dyn Environment) -> SdkResult<()> {
        for msg in tx.msgs() {
            self.route(msg.as_ref(), env)?;
        }
        Ok(())
    }
}
