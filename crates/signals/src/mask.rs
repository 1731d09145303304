// crates/signals/src/mask.rs
use nix::sys::signal::{SigSet, SigmaskHow, Signal, sigprocmask};
use posix_demos_core::{Error, Result};

/// Every signal except `sig`.
pub fn all_except(sig: Signal) -> SigSet {
    let mut mask = SigSet::all();
    mask.remove(sig);
    mask
}

fn change(how: SigmaskHow, set: Option<&SigSet>) -> Result<SigSet> {
    let mut old = SigSet::empty();
    sigprocmask(how, set, Some(&mut old)).map_err(|e| Error::errno("sigprocmask", e))?;
    Ok(old)
}

/// Replace the mask of the calling thread, returning the previous mask.
pub fn set_mask(mask: &SigSet) -> Result<SigSet> {
    change(SigmaskHow::SIG_SETMASK, Some(mask))
}

pub fn block(sig: Signal) -> Result<SigSet> {
    let mut set = SigSet::empty();
    set.add(sig);
    change(SigmaskHow::SIG_BLOCK, Some(&set))
}

pub fn unblock(sig: Signal) -> Result<SigSet> {
    let mut set = SigSet::empty();
    set.add(sig);
    change(SigmaskHow::SIG_UNBLOCK, Some(&set))
}

/// The mask currently in effect.
pub fn blocked() -> Result<SigSet> {
    change(SigmaskHow::SIG_BLOCK, None)
}

pub fn is_blocked(sig: Signal) -> Result<bool> {
    Ok(blocked()?.contains(sig))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_except_leaves_only_target_open() {
        let mask = all_except(Signal::SIGABRT);
        assert!(!mask.contains(Signal::SIGABRT));
        assert!(mask.contains(Signal::SIGINT));
        assert!(mask.contains(Signal::SIGTSTP));
    }

    #[test]
    fn block_then_unblock_restores_thread_mask() {
        let before = is_blocked(Signal::SIGUSR2).unwrap();
        block(Signal::SIGUSR2).unwrap();
        assert!(is_blocked(Signal::SIGUSR2).unwrap());
        let old = unblock(Signal::SIGUSR2).unwrap();
        assert!(old.contains(Signal::SIGUSR2));
        assert!(!is_blocked(Signal::SIGUSR2).unwrap());
        if before {
            block(Signal::SIGUSR2).unwrap();
        }
    }
}
