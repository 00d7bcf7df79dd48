// handlers/mod.rs - HTTP handlers
//
// Pages (session-guarded, redirect or describe), legacy shims (always
// redirect), and the small JSON API used by client components.

pub mod finance;
pub mod navigate;
pub mod pages;
pub mod session;
pub mod shims;
pub mod status;
