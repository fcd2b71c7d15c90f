#![allow(unused)]

pub mod setup;
pub mod templates;
