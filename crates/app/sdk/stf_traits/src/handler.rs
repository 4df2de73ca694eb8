//! Ante and post pipelines.
//!
//! A pipeline is an ordered list of decorators. Each decorator receives the rest of the
//! pipeline as `next` and decides whether, and when, to call it. The empty remainder
//! succeeds.

use crate::context::TxContext;
use evolve_core::SdkResult;

pub trait AnteHandler<Tx: ?Sized> {
    fn handle(&self, ctx: &mut TxContext<'_>, tx: &Tx, simulate: bool) -> SdkResult<()>;
}

pub trait AnteDecorator<Tx: ?Sized> {
    fn ante_handle(
        &self,
        ctx: &mut TxContext<'_>,
        tx: &Tx,
        simulate: bool,
        next: &dyn AnteHandler<Tx>,
    ) -> SdkResult<()>;
}

pub trait PostHandler<Tx: ?Sized> {
    fn handle(
        &self,
        ctx: &mut TxContext<'_>,
        tx: &Tx,
        simulate: bool,
        success: bool,
    ) -> SdkResult<()>;
}

pub trait PostDecorator<Tx: ?Sized> {
    fn post_handle(
        &self,
        ctx: &mut TxContext<'_>,
        tx: &Tx,
        simulate: bool,
        success: bool,
        next: &dyn PostHandler<Tx>,
    ) -> SdkResult<()>;
}

impl<Tx: ?Sized, F> AnteHandler<Tx> for F
where
    F: Fn(&mut TxContext<'_>, &Tx, bool) -> SdkResult<()>,
{
    fn handle(&self, ctx: &mut TxContext<'_>, tx: &Tx, simulate: bool) -> SdkResult<()> {
        self(ctx, tx, simulate)
    }
}

impl<Tx: ?Sized, F> PostHandler<Tx> for F
where
    F: Fn(&mut TxContext<'_>, &Tx, bool, bool) -> SdkResult<()>,
{
    fn handle(
        &self,
        ctx: &mut TxContext<'_>,
        tx: &Tx,
        simulate: bool,
        success: bool,
    ) -> SdkResult<()> {
        self(ctx, tx, simulate, success)
    }
}

/// Ordered ante decorators.
pub struct AnteChain<Tx: ?Sized> {
    decorators: Vec<Box<dyn AnteDecorator<Tx>>>,
}

impl<Tx: ?Sized> AnteChain<Tx> {
    pub fn new() -> Self {
        Self {
            decorators: Vec::new(),
        }
    }

    /// Appends `decorator`; it runs after every decorator added before it.
    pub fn with(mut self, decorator: impl AnteDecorator<Tx> + 'static) -> Self {
        self.decorators.push(Box::new(decorator));
        self
    }

    pub fn len(&self) -> usize {
        self.decorators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decorators.is_empty()
    }
}

impl<Tx: ?Sized> Default for AnteChain<Tx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tx: ?Sized> AnteHandler<Tx> for AnteChain<Tx> {
    fn handle(&self, ctx: &mut TxContext<'_>, tx: &Tx, simulate: bool) -> SdkResult<()> {
        AnteLink {
            rest: &self.decorators,
        }
        .handle(ctx, tx, simulate)
    }
}

struct AnteLink<'c, Tx: ?Sized> {
    rest: &'c [Box<dyn AnteDecorator<Tx>>],
}

impl<Tx: ?Sized> AnteHandler<Tx> for AnteLink<'_, Tx> {
    fn handle(&self, ctx: &mut TxContext<'_>, tx: &Tx, simulate: bool) -> SdkResult<()> {
        match self.rest.split_first() {
            Some((head, rest)) => head.ante_handle(ctx, tx, simulate, &AnteLink { rest }),
            None => Ok(()),
        }
    }
}

/// Ordered post decorators.
pub struct PostChain<Tx: ?Sized> {
    decorators: Vec<Box<dyn PostDecorator<Tx>>>,
}

impl<Tx: ?Sized> PostChain<Tx> {
    pub fn new() -> Self {
        Self {
            decorators: Vec::new(),
        }
    }

    pub fn with(mut self, decorator: impl PostDecorator<Tx> + 'static) -> Self {
        self.decorators.push(Box::new(decorator));
        self
    }

    pub fn len(&self) -> usize {
        self.decorators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decorators.is_empty()
    }
}

impl<Tx: ?Sized> Default for PostChain<Tx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tx: ?Sized> PostHandler<Tx> for PostChain<Tx> {
    fn handle(
        &self,
        ctx: &mut TxContext<'_>,
        tx: &Tx,
        simulate: bool,
        success: bool,
    ) -> SdkResult<()> {
        PostLink {
            rest: &self.decorators,
        }
        .handle(ctx, tx, simulate, success)
    }
}

struct PostLink<'c, Tx: ?Sized> {
    rest: &'c [Box<dyn PostDecorator<Tx>>],
}

impl<Tx: ?Sized> PostHandler<Tx> for PostLink<'_, Tx> {
    fn handle(
        &self,
        ctx: &mut TxContext<'_>,
        tx: &Tx,
        simulate: bool,
        success: bool,
    ) -> SdkResult<()> {
        match self.rest.split_first() {
            Some((head, rest)) => {
                head.post_handle(ctx, tx, simulate, success, &PostLink { rest })
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evolve_core::{
        define_error, Address, BlockContext, Checkpoint, Environment, ErrorCode,
    };
    use std::cell::RefCell;
    use std::rc::Rc;

    define_error!(ERR_STOP, 0x7F, "stop");

    struct NullEnv;

    impl Environment for NullEnv {
        fn block(&self) -> BlockContext {
            BlockContext::default()
        }
        fn get(&self, _key: &[u8]) -> SdkResult<Option<Vec<u8>>> {
            Ok(None)
        }
        fn set(&mut self, _key: &[u8], _value: Vec<u8>) -> SdkResult<()> {
            Ok(())
        }
        fn remove(&mut self, _key: &[u8]) -> SdkResult<()> {
            Ok(())
        }
        fn checkpoint(&self) -> Checkpoint {
            Checkpoint::new(0)
        }
        fn restore(&mut self, _checkpoint: Checkpoint) -> SdkResult<()> {
            Ok(())
        }
    }

    type Log = Rc<RefCell<Vec<String>>>;

    struct Tag {
        name: &'static str,
        log: Log,
        fail: Option<ErrorCode>,
    }

    impl AnteDecorator<()> for Tag {
        fn ante_handle(
            &self,
            ctx: &mut TxContext<'_>,
            tx: &(),
            simulate: bool,
            next: &dyn AnteHandler<()>,
        ) -> SdkResult<()> {
            self.log.borrow_mut().push(format!("{}:before", self.name));
            if let Some(err) = self.fail {
                return Err(err);
            }
            let res = next.handle(ctx, tx, simulate);
            self.log.borrow_mut().push(format!("{}:after", self.name));
            res
        }
    }

    impl PostDecorator<()> for Tag {
        fn post_handle(
            &self,
            ctx: &mut TxContext<'_>,
            tx: &(),
            simulate: bool,
            success: bool,
            next: &dyn PostHandler<()>,
        ) -> SdkResult<()> {
            self.log
                .borrow_mut()
                .push(format!("{}:success={success}", self.name));
            next.handle(ctx, tx, simulate, success)
        }
    }

    fn tag(name: &'static str, log: &Log, fail: Option<ErrorCode>) -> Tag {
        Tag {
            name,
            log: log.clone(),
            fail,
        }
    }

    #[test]
    fn ante_chain_runs_in_order_and_nests() {
        let log = Log::default();
        let chain = AnteChain::new()
            .with(tag("a", &log, None))
            .with(tag("b", &log, None));
        let mut env = NullEnv;
        let mut ctx = TxContext::new(&mut env, "c");

        chain.handle(&mut ctx, &(), false).unwrap();
        assert_eq!(
            *log.borrow(),
            vec!["a:before", "b:before", "b:after", "a:after"]
        );
    }

    #[test]
    fn ante_failure_short_circuits() {
        let log = Log::default();
        let chain = AnteChain::new()
            .with(tag("a", &log, Some(ERR_STOP)))
            .with(tag("b", &log, None));
        let mut env = NullEnv;
        let mut ctx = TxContext::new(&mut env, "c");

        assert_eq!(chain.handle(&mut ctx, &(), false), Err(ERR_STOP));
        assert_eq!(*log.borrow(), vec!["a:before"]);
    }

    #[test]
    fn empty_chains_succeed() {
        let mut env = NullEnv;
        let mut ctx = TxContext::new(&mut env, "c");
        assert!(AnteChain::<()>::new().handle(&mut ctx, &(), false).is_ok());
        assert!(PostChain::<()>::new()
            .handle(&mut ctx, &(), false, true)
            .is_ok());
    }

    #[test]
    fn post_chain_forwards_success_flag() {
        let log = Log::default();
        let chain = PostChain::new()
            .with(tag("a", &log, None))
            .with(tag("b", &log, None));
        let mut env = NullEnv;
        let mut ctx = TxContext::new(&mut env, "c");

        chain.handle(&mut ctx, &(), false, false).unwrap();
        assert_eq!(*log.borrow(), vec!["a:success=false", "b:success=false"]);
    }

    #[test]
    fn closures_are_handlers() {
        let mut env = NullEnv;
        let mut ctx = TxContext::new(&mut env, "c");
        let next = |ctx: &mut TxContext<'_>, _tx: &(), _simulate: bool| -> SdkResult<()> {
            ctx.set_pending_signer(Address::new(vec![9]));
            Ok(())
        };
        let log = Log::default();
        tag("a", &log, None)
            .ante_handle(&mut ctx, &(), false, &next)
            .unwrap();
        assert_eq!(ctx.pending_signer(), Some(&Address::new(vec![9])));
    }
}
