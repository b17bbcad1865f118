//! Derived catalog listings.
//!
//! Pure functions over a game list for the browse, deals, free-to-play and
//! home views. None of them touch the network; callers fetch the list from a
//! [`CatalogSource`](super::CatalogSource) first.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use game_store_core::Game;
use serde::{Deserialize, Serialize};

/// Genre excluded from home page categories (it has its own section).
const FREE_TO_PLAY_GENRE: &str = "Free to Play";

/// Games shown in the home page hero rotation.
pub const TRENDING_COUNT: usize = 7;

/// Category rows shown on the home page.
pub const CATEGORY_COUNT: usize = 8;

/// Games shown in the free row and in each category row.
pub const SECTION_GAMES: usize = 5;

/// Browse sort orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Most reviewed first.
    #[default]
    Popularity,
    /// Cheapest effective price first.
    PriceAsc,
    /// Most expensive effective price first.
    PriceDesc,
}

/// A home page category row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub genre: String,
    pub games: Vec<Game>,
}

/// Case-insensitive substring match on title or any genre.
///
/// An empty or all-whitespace term matches everything.
#[must_use]
pub fn search(games: Vec<Game>, term: &str) -> Vec<Game> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return games;
    }

    games
        .into_iter()
        .filter(|g| {
            g.title.to_lowercase().contains(&needle)
                || g.genre.iter().any(|genre| genre.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Games tagged with `genre` (case-insensitive, exact tag).
#[must_use]
pub fn filter_genre(games: Vec<Game>, genre: &str) -> Vec<Game> {
    games
        .into_iter()
        .filter(|g| g.genre.iter().any(|tag| tag.eq_ignore_ascii_case(genre)))
        .collect()
}

/// Sort in place. Ties keep catalog order.
pub fn sort(games: &mut [Game], order: SortOrder) {
    match order {
        SortOrder::Popularity => games.sort_by_key(|g| Reverse(g.reviews_count)),
        SortOrder::PriceAsc => games.sort_by_key(Game::effective_price),
        SortOrder::PriceDesc => games.sort_by_key(|g| Reverse(g.effective_price())),
    }
}

/// Games with a positive discount.
#[must_use]
pub fn deals(games: Vec<Game>) -> Vec<Game> {
    games.into_iter().filter(Game::has_discount).collect()
}

/// Games with a zero base price.
#[must_use]
pub fn free_games(games: Vec<Game>) -> Vec<Game> {
    games.into_iter().filter(Game::is_free).collect()
}

/// The `count` most reviewed games.
#[must_use]
pub fn trending(mut games: Vec<Game>, count: usize) -> Vec<Game> {
    sort(&mut games, SortOrder::Popularity);
    games.truncate(count);
    games
}

/// Group games by primary genre and keep the `count` largest groups.
///
/// Games whose primary genre is "Free to Play" are left out. Groups of equal
/// size are ordered by genre name.
#[must_use]
pub fn top_categories(games: &[Game], count: usize) -> Vec<Category> {
    let mut groups: BTreeMap<&str, Vec<Game>> = BTreeMap::new();
    for game in games {
        if let Some(genre) = game.primary_genre()
            && genre != FREE_TO_PLAY_GENRE
        {
            groups.entry(genre).or_default().push(game.clone());
        }
    }

    let mut categories: Vec<Category> = groups
        .into_iter()
        .map(|(genre, games)| Category {
            genre: genre.to_owned(),
            games,
        })
        .collect();
    categories.sort_by_key(|c| Reverse(c.games.len()));
    categories.truncate(count);
    categories
}
