//! Sequential, type-prefixed record identifiers (`C0001`, `L0001`, `D0001`).

pub const CLIENT_PREFIX: &str = "C";
pub const LISTING_PREFIX: &str = "L";
pub const DEAL_PREFIX: &str = "D";

/// Minimum number of digits after the prefix.
pub const ID_WIDTH: usize = 4;

/// Mint the identifier that follows a collection of `current_count` rows.
///
/// ```
/// assert_eq!(estate_core::id::mint("C", 0), "C0001");
/// ```
pub fn mint(prefix: &str, current_count: usize) -> String {
  format!("{prefix}{:0width$}", current_count + 1, width = ID_WIDTH)
}

/// The numeric part of an id minted under `prefix`, if `id` has that shape.
pub fn sequence_of(prefix: &str, id: &str) -> Option<usize> {
  let digits = id.strip_prefix(prefix)?;
  if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  digits.parse().ok()
}

// ─── Sequence ────────────────────────────────────────────────────────────────

/// Per-table high-water mark for minted ids.
///
/// Not synchronised itself: it lives next to the table replica and is only
/// advanced while the table lock is held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
  prefix: &'static str,
  issued: usize,
}

impl IdSequence {
  /// Seed the sequence from the ids currently stored in a table.
  ///
  /// The mark starts at the larger of the row count and the highest sequence
  /// number in use, so a gap left by a deletion is never refilled.
  pub fn from_existing<'a>(
    prefix: &'static str,
    ids: impl IntoIterator<Item = &'a str>,
  ) -> Self {
    let (rows, highest) = ids.into_iter().fold((0, 0), |(rows, highest), id| {
      (rows + 1, highest.max(sequence_of(prefix, id).unwrap_or(0)))
    });
    Self { prefix, issued: rows.max(highest) }
  }

  /// The id the next call to [`IdSequence::advance`] will return.
  pub fn peek(&self) -> String { mint(self.prefix, self.issued) }

  /// Consume and return the next id.
  pub fn advance(&mut self) -> String {
    let id = self.peek();
    self.issued += 1;
    id
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mint_pads_to_four_digits() {
    assert_eq!(mint("C", 0), "C0001");
    assert_eq!(mint("C", 9), "C0010");
    assert_eq!(mint("L", 123), "L0124");
  }

  #[test]
  fn mint_grows_past_the_pad_width() {
    assert_eq!(mint("D", 9999), "D10000");
  }

  #[test]
  fn sequence_of_rejects_foreign_shapes() {
    assert_eq!(sequence_of("C", "C0042"), Some(42));
    assert_eq!(sequence_of("C", "L0042"), None);
    assert_eq!(sequence_of("C", "C"), None);
    assert_eq!(sequence_of("C", "C00x1"), None);
  }

  #[test]
  fn sequence_skips_ids_freed_by_deletion() {
    // C0002 was deleted; a size-derived id would hand out C0002 again.
    let mut seq = IdSequence::from_existing(CLIENT_PREFIX, ["C0001", "C0003"]);
    assert_eq!(seq.advance(), "C0004");
    assert_eq!(seq.advance(), "C0005");
  }

  #[test]
  fn empty_table_starts_at_one() {
    let mut seq = IdSequence::from_existing(DEAL_PREFIX, []);
    assert_eq!(seq.peek(), "D0001");
    assert_eq!(seq.advance(), "D0001");
    assert_eq!(seq.peek(), "D0002");
  }
}
