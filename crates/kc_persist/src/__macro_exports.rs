//! Items used by the code `kc_persist_derive` and `submit_codec!` generate.

pub use alloc::string::String;

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::CodecRegistry;

    /// One `inventory` submission.
    pub enum CodecRegistration {
        /// Submitted once by this crate, seen only where collection works.
        Available,
        Codec(fn(&mut CodecRegistry)),
    }

    inventory::collect!(CodecRegistration);

    inventory::submit! {
        CodecRegistration::Available
    }
}
