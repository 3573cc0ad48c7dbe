//! Prompt templates for every model-facing stage.
//!
//! Each template lives in its own module with a `render_*` function that
//! fills placeholders from typed inputs. Pipeline code never assembles
//! prompt strings inline, so the full set of model-facing text is visible
//! in one place.
//!
//! Every template carries a phrase that appears in no other template (the
//! tests pin these down); `FakeProvider` pattern matching relies on that.

pub mod extract_dish_name;
pub mod extract_ingredients;
pub mod followup;
pub mod full_recipe;
pub mod photo;
pub mod route_intent;
pub mod suggest_dish;

pub use extract_dish_name::render_extract_dish_name_prompt;
pub use extract_ingredients::render_extract_ingredients_prompt;
pub use followup::render_followup_prompt;
pub use full_recipe::render_full_recipe_prompt;
pub use photo::{render_dish_photo_prompt, render_ingredient_photo_prompt};
pub use route_intent::render_route_intent_prompt;
pub use suggest_dish::render_suggest_dish_prompt;
