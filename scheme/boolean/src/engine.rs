use crate::error::{Error, Result};
use core::cell::RefCell;
use rand::{rngs::OsRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::trace;

thread_local! {
    static BOOLEAN_ENGINE: RefCell<Option<BooleanEngine>> = const { RefCell::new(None) };
}

/// Per-thread source of randomness behind every operation that is not given
/// an explicit rng. It is seeded from the OS on first use.
#[derive(Debug)]
pub struct BooleanEngine {
    rng: ChaCha20Rng,
}

impl BooleanEngine {
    pub fn new() -> Result<Self> {
        let mut seed = <ChaCha20Rng as SeedableRng>::Seed::default();
        OsRng
            .try_fill_bytes(&mut seed)
            .map_err(|err| Error::Entropy(err.to_string()))?;
        trace!("seeded boolean engine");
        Ok(Self {
            rng: ChaCha20Rng::from_seed(seed),
        })
    }

    /// Runs `f` with the engine of the current thread. A nested call from
    /// within `f` fails with [`Error::Entropy`].
    pub fn with_thread_local_mut<R>(f: impl FnOnce(&mut Self) -> R) -> Result<R> {
        BOOLEAN_ENGINE.with(|engine| {
            let mut engine = engine
                .try_borrow_mut()
                .map_err(|_| Error::Entropy("engine is already in use on this thread".into()))?;
            if engine.is_none() {
                *engine = Some(Self::new()?);
            }
            match engine.as_mut() {
                Some(engine) => Ok(f(engine)),
                None => Err(Error::Entropy("engine is not initialized".into())),
            }
        })
    }

    pub fn rng(&mut self) -> &mut ChaCha20Rng {
        &mut self.rng
    }
}

#[cfg(test)]
mod test {
    use crate::{engine::BooleanEngine, error::Error};
    use rand::RngCore;

    #[test]
    fn thread_local() {
        let a = BooleanEngine::with_thread_local_mut(|engine| engine.rng().next_u64()).unwrap();
        let b = BooleanEngine::with_thread_local_mut(|engine| engine.rng().next_u64()).unwrap();
        assert_ne!(a, b);
        let other = std::thread::spawn(|| {
            BooleanEngine::with_thread_local_mut(|engine| engine.rng().next_u64()).unwrap()
        });
        assert_ne!(other.join().unwrap(), a);
    }

    #[test]
    fn nested() {
        let inner = BooleanEngine::with_thread_local_mut(|_| {
            BooleanEngine::with_thread_local_mut(|engine| engine.rng().next_u64())
        })
        .unwrap();
        assert!(matches!(inner, Err(Error::Entropy(_))));
        assert!(BooleanEngine::with_thread_local_mut(|engine| engine.rng().next_u64()).is_ok());
    }
}
