mod enum_impl;
mod struct_impl;

pub(crate) use enum_impl::impl_persist_enum;
pub(crate) use struct_impl::impl_persist;
