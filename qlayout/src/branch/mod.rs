//! Request dispatch for generated design content.
//!
//! A branch resolves one design concept (chips, qubits, topology, ...). Every
//! branch is a request enum with one variant per accepted parameter signature:
//! the sorted, `__`-joined top-level keys of the request bag. [`resolve`] picks
//! the variant whose signature matches exactly and fails otherwise. There is no
//! partial or fuzzy matching, so adding or dropping a single key changes the outcome.

use arcstr::ArcStr;
use serde::de::DeserializeOwned;

use crate::error::{with_err_context, ErrorContext, ErrorSource, QlayoutError, Result};
use crate::log::debug;
use crate::options::OptionBag;

pub mod air_bridges;
pub mod chips;
pub mod coupling_lines;
pub mod crossovers;
pub mod indium_bumps;
pub mod qubits;
pub mod readout_lines;
pub mod topology;

pub use air_bridges::AirBridgesRequest;
pub use chips::ChipsRequest;
pub use coupling_lines::CouplingLinesRequest;
pub use crossovers::CrossoversRequest;
pub use indium_bumps::IndiumBumpsRequest;
pub use qubits::QubitsRequest;
pub use readout_lines::ReadoutLinesRequest;
pub use topology::TopologyRequest;

/// A resolver for one design concept.
pub trait Branch: Sized {
    /// The branch name used in error messages.
    const NAME: &'static str;
    /// Every signature this branch accepts.
    const SIGNATURES: &'static [&'static str];

    /// Builds the request for `signature`, which is one of [`Branch::SIGNATURES`].
    fn from_signature(signature: &str, bag: &OptionBag) -> Result<Self>;
}

/// Resolves `bag` into a request of branch `B` by its exact signature.
pub fn resolve<B: Branch>(bag: &OptionBag) -> Result<B> {
    let signature = bag.signature();
    let inner = || -> Result<B> {
        if !B::SIGNATURES.contains(&signature.as_str()) {
            return Err(unmatched(B::NAME, signature.as_str()));
        }
        debug!("resolved {} request with signature {signature}", B::NAME);
        B::from_signature(signature.as_str(), bag)
    };
    with_err_context(inner(), || ErrorContext::ResolveBranch(B::NAME))
}

pub(crate) fn unmatched(branch: &'static str, signature: &str) -> QlayoutError {
    ErrorSource::SignatureResolution {
        branch,
        signature: ArcStr::from(signature),
    }
    .into()
}

/// Decodes a request payload.
#[inline]
pub(crate) fn payload<T: DeserializeOwned>(bag: &OptionBag) -> Result<T> {
    bag.to_typed()
}

/// Collects generated bags into a collection bag keyed by their `name`.
pub(crate) fn keyed(bags: impl IntoIterator<Item = OptionBag>) -> Result<OptionBag> {
    let mut out = OptionBag::new();
    for bag in bags {
        let name = bag.require_str("name")?.clone();
        out.insert(name, bag);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bag;

    #[test]
    fn test_exact_signature_only() {
        let bag = bag! { "chip_name" => "chip0", "qubits_ops" => bag!{} };
        let err = resolve::<ChipsRequest>(&bag).unwrap_err();
        match err.source() {
            ErrorSource::SignatureResolution { branch, signature } => {
                assert_eq!(*branch, "chips");
                assert_eq!(signature, "chip_name__qubits_ops");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(err.context(), &[ErrorContext::ResolveBranch("chips")]);

        let bag = bag! { "qubits_ops" => bag!{} };
        assert!(matches!(
            resolve::<ChipsRequest>(&bag).unwrap(),
            ChipsRequest::FromQubits { .. }
        ));
    }

    #[test]
    fn test_signatures_are_sorted() {
        fn check<B: Branch>() {
            for sig in B::SIGNATURES {
                let mut keys: Vec<&str> = sig.split("__").collect();
                keys.sort_unstable();
                assert_eq!(keys.join("__"), *sig, "{} signature {sig} is not sorted", B::NAME);
            }
        }
        check::<ChipsRequest>();
        check::<QubitsRequest>();
        check::<TopologyRequest>();
        check::<CouplingLinesRequest>();
        check::<ReadoutLinesRequest>();
        check::<AirBridgesRequest>();
        check::<CrossoversRequest>();
        check::<IndiumBumpsRequest>();
    }
}
