//! Typed CRUD over the directory tables.
//!
//! Every repository borrows a [`ConnectionTrait`](sea_orm::ConnectionTrait), so the same
//! operations run against the pool or inside a [`UnitOfWork`](crate::db::UnitOfWork).

mod artist;
mod genre;
mod show;
mod venue;

pub use artist::ArtistRepository;
pub use genre::GenreRepository;
pub use show::{ShowListing, ShowRepository};
pub use venue::VenueRepository;

use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{ColumnTrait, IntoSimpleExpr};

const LIKE_ESCAPE: char = '!';

/// Builds a LIKE pattern matching `term` as a literal substring.
///
/// `%`, `_` and the escape character itself are escaped, so a search for `"50%"`
/// only matches names containing that exact text. Case is left as typed; folding
/// happens in the database on both sides.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Case-insensitive "column contains term" condition.
///
/// Column and pattern both go through the database's `LOWER`, so they are folded by the
/// same rules on every backend (SQLite only folds ASCII).
pub(crate) fn name_contains<C: ColumnTrait>(column: C, term: &str) -> SimpleExpr {
    Expr::cust_with_exprs(
        format!("LOWER($1) LIKE LOWER($2) ESCAPE '{}'", LIKE_ESCAPE),
        [
            column.into_simple_expr(),
            Expr::val(contains_pattern(term)).into(),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn pattern_keeps_term_case() {
        assert_eq!(contains_pattern("Blue Note"), "%Blue Note%");
        assert_eq!(contains_pattern("ÉCOLE"), "%ÉCOLE%");
    }

    #[test]
    fn empty_term_matches_everything() {
        assert_eq!(contains_pattern(""), "%%");
    }

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(contains_pattern("100%_!"), "%100!%!_!!%");
    }
}
