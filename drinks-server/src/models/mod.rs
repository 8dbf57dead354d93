use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Longest accepted drink title
pub const MAX_TITLE_LEN: usize = 80;

/// One line of a drink recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    /// Ingredient name, only disclosed in the long projection
    pub name: String,
    /// Display color of the ingredient
    pub color: String,
    /// Number of parts of the ingredient in the drink
    pub parts: u32,
}

/// An ingredient with its name redacted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShortIngredient {
    pub color: String,
    pub parts: u32,
}

/// A drink on the menu.
///
/// Serialized as-is this is the long projection, with ingredient names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Drink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// The short projection of a drink, with ingredient names redacted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShortDrink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

impl Drink {
    pub fn short(&self) -> ShortDrink {
        ShortDrink {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|ingredient| ShortIngredient {
                    color: ingredient.color.clone(),
                    parts: ingredient.parts,
                })
                .collect(),
        }
    }
}

/// A validated drink that is about to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDrink {
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// Recipe as sent by clients: either a list of ingredients or a single one
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum RecipeInput {
    Many(Vec<Ingredient>),
    One(Ingredient),
}

/// Request body of the create and update endpoints
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct DrinkPayload {
    /// Drink title, at most 80 characters
    pub title: String,
    /// Ingredients of the drink
    pub recipe: RecipeInput,
}

impl TryFrom<DrinkPayload> for NewDrink {
    type Error = String;

    fn try_from(payload: DrinkPayload) -> Result<Self, Self::Error> {
        let title = payload.title.trim().to_string();
        if title.is_empty() {
            return Err("title must not be empty".to_string());
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(format!("title must be at most {MAX_TITLE_LEN} characters"));
        }

        let recipe = match payload.recipe {
            RecipeInput::Many(ingredients) => ingredients,
            RecipeInput::One(ingredient) => vec![ingredient],
        };
        if recipe.is_empty() {
            return Err("recipe must contain at least one ingredient".to_string());
        }

        Ok(NewDrink { title, recipe })
    }
}
