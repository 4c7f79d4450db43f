/// Runs `func` with `arg` when the returned guard goes out of scope, including
/// early returns through `?`.
pub fn finally<A, F>(arg: A, func: F) -> FinallyGuard<A, F>
where
    F: FnMut(&mut A),
{
    FinallyGuard { arg, func }
}

pub struct FinallyGuard<A, F>
where
    F: FnMut(&mut A),
{
    arg: A,
    func: F,
}

impl<A, F> FinallyGuard<A, F>
where
    F: FnMut(&mut A),
{
    /// Gets a mutable reference to the guarded argument.
    #[inline]
    pub fn get_mut(&mut self) -> &mut A {
        &mut self.arg
    }
}

impl<A, F> Drop for FinallyGuard<A, F>
where
    F: FnMut(&mut A),
{
    fn drop(&mut self) {
        (self.func)(&mut self.arg)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn runs_on_early_return() {
        let counter = Cell::new(0);

        let run = |fail: bool| -> Result<(), ()> {
            let _guard = finally((), |_| counter.set(counter.get() + 1));
            if fail {
                return Err(());
            }

            Ok(())
        };

        assert!(run(true).is_err());
        assert!(run(false).is_ok());
        assert_eq!(counter.get(), 2);
    }
}
