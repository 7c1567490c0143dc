//! Grammar routines, one module per production family.

mod definitions;
mod expressions;
mod statements;
mod units;
