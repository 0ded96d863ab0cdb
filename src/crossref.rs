use crate::model::{RecipeStatus, Token, TokenKind};
use crate::registry::RecipeSet;
use log::debug;

/// Outcome of checking a job's recipe steps against the known recipes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossReference {
    pub all_known: bool,
    /// Step names that are not in the recipe set, in stream order.
    pub missing: Vec<String>,
}

/// Mark every recipe candidate as found or missing in `recipes`.
///
/// With an empty recipe set nothing can be judged: tokens are left untouched
/// and every step counts as known.
pub fn annotate(tokens: &mut [Token], recipes: &RecipeSet) -> CrossReference {
    if recipes.is_empty() {
        debug!("No recipe set supplied, skipping cross-reference");
        return CrossReference {
            all_known: true,
            missing: Vec::new(),
        };
    }

    let mut missing = Vec::new();
    for token in tokens
        .iter_mut()
        .filter(|t| t.kind == TokenKind::RecipeCandidate)
    {
        let name = token.text();
        let found = recipes.contains(&name);
        if !found && token.is_recipe_step() {
            missing.push(name.into_owned());
        }
        token.status = RecipeStatus::from_found(found);
    }

    CrossReference {
        all_known: missing.is_empty(),
        missing,
    }
}
