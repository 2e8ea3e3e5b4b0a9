mod common;
mod pricing;
mod properties;
