#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use kc_persist as persist;
pub use kc_tree as tree;
pub use kc_utils as utils;
