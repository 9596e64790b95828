mod common;
mod derivation;
mod routing;
