//! Loosely unique identifiers: `<prefix>_<epoch-ms>_<9 base36 chars>`.
//!
//! Good enough for client-local correlation (session, conversation). Not a
//! security token and not guaranteed collision-free.

use std::rc::Rc;

use crate::ports::Clock;

/// Length of the random part of a generated id
pub const SUFFIX_LEN: usize = 9;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Clone)]
pub struct IdGenerator {
    clock: Rc<dyn Clock>,
}

impl IdGenerator {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn generate(&self, prefix: &str) -> String {
        let random = uuid::Uuid::new_v4().as_u128();
        format!(
            "{}_{}_{}",
            prefix,
            self.clock.now_millis(),
            base36_suffix(random)
        )
    }
}

/// Render the low digits of `n` as exactly [`SUFFIX_LEN`] base36 characters.
fn base36_suffix(mut n: u128) -> String {
    let mut digits = [b'0'; SUFFIX_LEN];
    for slot in digits.iter_mut().rev() {
        *slot = BASE36[(n % 36) as usize];
        n /= 36;
    }
    digits.iter().map(|&b| b as char).collect()
}
