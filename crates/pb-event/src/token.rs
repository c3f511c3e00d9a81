//! `TokenPool` — launch bookkeeping for a conserved token population.
//!
//! The bounce workload circulates a fixed set of `size` records through the
//! entity graph: one injector entity launches them all, and every receiving
//! handler reroutes the same record.  The pool hands out sequential
//! `TokenId`s at launch time; after launch the record itself is the only
//! owner, so the pool holds no per-token state — conservation is checked by
//! summing absorbed counts against `size` once the run drains.

use pb_core::{BenchError, BenchResult, TokenId};

#[derive(Debug)]
pub struct TokenPool {
    size: u32,
    launched: u32,
}

impl TokenPool {
    /// A pool of `size` tokens.  An empty pool would make the workload a
    /// no-op, so zero is a configuration error.
    pub fn new(size: u32) -> BenchResult<Self> {
        if size == 0 {
            return Err(BenchError::Config("token pool size must be nonzero".into()));
        }
        Ok(Self { size, launched: 0 })
    }

    /// Hand out the next token identity.  Returns `None` once all `size`
    /// tokens are in flight.
    pub fn launch(&mut self) -> Option<TokenId> {
        if self.launched == self.size {
            return None;
        }
        let id = TokenId(self.launched);
        self.launched += 1;
        Some(id)
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub fn launched(&self) -> u32 {
        self.launched
    }

    #[inline]
    pub fn fully_launched(&self) -> bool {
        self.launched == self.size
    }
}
