//! Domain model: what one serial read turns into.
//!
//! - **`batch`** – [`ByteBatch`], the non-empty result of one read, and its
//!   expansion into an ordered burst of key records.
//! - **`echo`** – the one-line diagnostic rendering logged for each batch.

pub mod batch;
pub mod echo;

pub use batch::{ByteBatch, MAX_BATCH_LEN};
