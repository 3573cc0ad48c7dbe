//! The conversation pipeline: one turn in, one reply out.
//!
//! [`handle_turn`] is the single entry point. It routes the utterance, runs
//! the stage calls for the chosen intent in their fixed order, and commits
//! context updates only after every stage involved has succeeded. A failed
//! turn leaves the conversation context exactly as it was.

mod router;
mod stages;

pub use router::classify;
pub use stages::{
    answer_followup, extract_dish_name, extract_ingredients, full_recipe, suggest_dish,
};

use crate::context::{ConversationContext, Recipe};
use crate::error::ChatError;
use crate::intent::Intent;
use crate::llm::LlmProvider;

/// Canned reply for utterances outside the assistant's three abilities.
/// Returned without any model call beyond routing.
pub const UNSUPPORTED_GUIDANCE: &str = "I can suggest a dish, write out a full recipe, \
or answer questions about the recipe we're already discussing. \
Ask me for one of those and I'll get cooking.";

/// One inbound turn: the utterance plus optional caller-supplied overrides
/// for dish name and recipe text, for callers that carry their own state.
#[derive(Debug, Clone, Default)]
pub struct TurnRequest<'a> {
    pub utterance: &'a str,
    pub dish_name: Option<&'a str>,
    pub recipe_text: Option<&'a str>,
}

impl<'a> TurnRequest<'a> {
    pub fn new(utterance: &'a str) -> Self {
        Self {
            utterance,
            dish_name: None,
            recipe_text: None,
        }
    }
}

/// Outcome of one handled turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub intent: Intent,
    /// Text to show the user.
    pub reply: String,
    /// Dish name derived or reused this turn, when the path produced one.
    pub dish_name: Option<String>,
    /// Ingredient summary, present only on the recipe path.
    pub main_ingredients: Option<Vec<String>>,
}

/// Route and handle one utterance against the session's context.
///
/// Stage order within a path is fixed: suggestion before name extraction,
/// recipe before ingredient extraction. The context is mutated strictly
/// after the last stage of the path succeeds, and the history records only
/// turns that produced a model-backed reply.
pub async fn handle_turn(
    llm: &dyn LlmProvider,
    turn: TurnRequest<'_>,
    context: &mut ConversationContext,
) -> Result<TurnOutcome, ChatError> {
    let intent = classify(llm, turn.utterance, context.has_recipe())
        .await
        .map_err(|source| ChatError::Classification { source })?;

    match intent {
        Intent::DishSuggestion => dish_suggestion_turn(llm, &turn, context).await,
        Intent::Recipe => recipe_turn(llm, &turn, context).await,
        Intent::Followup => followup_turn(llm, &turn, context).await,
        Intent::Unsupported => Ok(TurnOutcome {
            intent,
            reply: UNSUPPORTED_GUIDANCE.to_string(),
            dish_name: None,
            main_ingredients: None,
        }),
    }
}

async fn dish_suggestion_turn(
    llm: &dyn LlmProvider,
    turn: &TurnRequest<'_>,
    context: &mut ConversationContext,
) -> Result<TurnOutcome, ChatError> {
    let raw = stages::suggest_dish(llm, turn.utterance).await?;
    // The raw reply is prose; only the extracted name goes into context.
    let dish_name = stages::extract_dish_name(llm, &raw).await?;

    context.record_suggestion(dish_name.as_str());
    context.record_exchange(turn.utterance, raw.as_str());

    Ok(TurnOutcome {
        intent: Intent::DishSuggestion,
        reply: raw,
        dish_name: Some(dish_name),
        main_ingredients: None,
    })
}

async fn recipe_turn(
    llm: &dyn LlmProvider,
    turn: &TurnRequest<'_>,
    context: &mut ConversationContext,
) -> Result<TurnOutcome, ChatError> {
    let dish_name = resolve_param(turn.dish_name, context.dish_name())
        .ok_or(ChatError::MissingParameter { name: "dish_name" })?
        .to_string();

    let full_text = stages::full_recipe(llm, &dish_name, turn.utterance).await?;
    let main_ingredients = stages::extract_ingredients(llm, &full_text).await?;

    context.record_recipe(Recipe {
        dish_name: dish_name.clone(),
        full_text: full_text.clone(),
        main_ingredients: main_ingredients.clone(),
    });
    context.record_exchange(turn.utterance, full_text.as_str());

    Ok(TurnOutcome {
        intent: Intent::Recipe,
        reply: full_text,
        dish_name: Some(dish_name),
        main_ingredients: Some(main_ingredients),
    })
}

async fn followup_turn(
    llm: &dyn LlmProvider,
    turn: &TurnRequest<'_>,
    context: &mut ConversationContext,
) -> Result<TurnOutcome, ChatError> {
    let dish_name = resolve_param(turn.dish_name, context.dish_name())
        .ok_or(ChatError::MissingParameter { name: "dish_name" })?
        .to_string();
    let recipe_text = resolve_param(
        turn.recipe_text,
        context.recipe().map(|r| r.full_text.as_str()),
    )
    .ok_or(ChatError::MissingParameter {
        name: "recipe_text",
    })?
    .to_string();

    let reply = stages::answer_followup(llm, &dish_name, &recipe_text, turn.utterance).await?;

    context.record_exchange(turn.utterance, reply.as_str());

    Ok(TurnOutcome {
        intent: Intent::Followup,
        reply,
        dish_name: Some(dish_name),
        main_ingredients: None,
    })
}

/// Request overrides win over stored context; blank overrides count as absent.
fn resolve_param<'a>(override_value: Option<&'a str>, stored: Option<&'a str>) -> Option<&'a str> {
    override_value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::FakeProvider;

    const VINDALOO_RECIPE: &str = "Chicken Vindaloo\n\nIngredients:\n- 500g chicken\n- 6 dried chilies\n- 100g yogurt\n- 1 onion\n- salt\n\nSteps:\n1. Marinate.\n2. Simmer.\n3. Serve.";

    fn vindaloo() -> Recipe {
        Recipe {
            dish_name: "Chicken Vindaloo".to_string(),
            full_text: VINDALOO_RECIPE.to_string(),
            main_ingredients: vec!["chicken".to_string(), "chilies".to_string()],
        }
    }

    #[tokio::test]
    async fn test_unsupported_skips_generation_and_context() {
        // Only the routing response is registered, so any stage call would
        // fail the turn; Ok here proves nothing else was called.
        let llm = FakeProvider::with_response("routing layer", "unsupported");
        let mut ctx = ConversationContext::new();

        let outcome = handle_turn(&llm, TurnRequest::new("what's the weather?"), &mut ctx)
            .await
            .unwrap();

        assert_eq!(outcome.intent, Intent::Unsupported);
        assert_eq!(outcome.reply, UNSUPPORTED_GUIDANCE);
        assert!(ctx.dish_name().is_none());
        assert!(ctx.history().is_empty());
    }

    #[tokio::test]
    async fn test_unrecognized_router_label_is_unsupported() {
        let llm = FakeProvider::with_response("routing layer", "smalltalk");
        let mut ctx = ConversationContext::new();

        let outcome = handle_turn(&llm, TurnRequest::new("tell me a joke"), &mut ctx)
            .await
            .unwrap();

        assert_eq!(outcome.intent, Intent::Unsupported);
        assert!(ctx.history().is_empty());
    }

    #[tokio::test]
    async fn test_suggestion_turn_sets_name_without_recipe() {
        let mut llm = FakeProvider::new();
        llm.add_response("routing layer", "dish_suggestion");
        llm.add_response(
            "pick what to cook",
            "Sure! Chicken Vindaloo would hit the spot tonight.",
        );
        llm.add_response("bare dish name", "Chicken Vindaloo");
        let mut ctx = ConversationContext::new();

        let outcome = handle_turn(&llm, TurnRequest::new("I want something spicy"), &mut ctx)
            .await
            .unwrap();

        assert_eq!(outcome.intent, Intent::DishSuggestion);
        assert_eq!(outcome.reply, "Sure! Chicken Vindaloo would hit the spot tonight.");
        assert_eq!(outcome.dish_name.as_deref(), Some("Chicken Vindaloo"));
        assert_eq!(ctx.dish_name(), Some("Chicken Vindaloo"));
        assert!(ctx.recipe().is_none());
        assert_eq!(ctx.history().len(), 1);
        assert_eq!(ctx.history()[0].utterance, "I want something spicy");
    }

    #[tokio::test]
    async fn test_recipe_turn_uses_context_dish() {
        let mut llm = FakeProvider::new();
        llm.add_response("routing layer", "recipe");
        llm.add_response("cooking expert", VINDALOO_RECIPE);
        llm.add_response(
            "only the main ingredients",
            "chicken\nchilies\nyogurt\nonion\nsalt",
        );
        let mut ctx = ConversationContext::new();
        ctx.record_suggestion("Chicken Vindaloo");

        let outcome = handle_turn(&llm, TurnRequest::new("give me the recipe"), &mut ctx)
            .await
            .unwrap();

        assert_eq!(outcome.intent, Intent::Recipe);
        assert_eq!(outcome.reply, VINDALOO_RECIPE);
        let ingredients = outcome.main_ingredients.unwrap();
        assert_eq!(ingredients, vec!["chicken", "chilies", "yogurt", "onion"]);

        let recipe = ctx.recipe().unwrap();
        assert_eq!(recipe.dish_name, "Chicken Vindaloo");
        assert_eq!(recipe.full_text, VINDALOO_RECIPE);
        assert_eq!(recipe.main_ingredients.len(), 4);
    }

    #[tokio::test]
    async fn test_recipe_turn_request_dish_wins_over_context() {
        let mut llm = FakeProvider::new();
        llm.add_response("routing layer", "recipe");
        // Registered against the override name: matching proves the prompt
        // was rendered with "Pad Thai", not the stored dish.
        llm.add_response("detailed recipe for Pad Thai", "Pad Thai\n\nSteps...");
        llm.add_response("only the main ingredients", "rice noodles\nshrimp");
        let mut ctx = ConversationContext::new();
        ctx.record_suggestion("Chicken Vindaloo");

        let turn = TurnRequest {
            utterance: "actually give me that recipe",
            dish_name: Some("Pad Thai"),
            recipe_text: None,
        };
        let outcome = handle_turn(&llm, turn, &mut ctx).await.unwrap();

        assert_eq!(outcome.dish_name.as_deref(), Some("Pad Thai"));
        assert_eq!(ctx.dish_name(), Some("Pad Thai"));
        assert_eq!(ctx.recipe().unwrap().dish_name, "Pad Thai");
    }

    #[tokio::test]
    async fn test_recipe_turn_without_dish_fails() {
        let llm = FakeProvider::with_response("routing layer", "recipe");
        let mut ctx = ConversationContext::new();

        let err = handle_turn(&llm, TurnRequest::new("give me the recipe"), &mut ctx)
            .await
            .unwrap_err();

        assert!(matches!(err, ChatError::MissingParameter { name: "dish_name" }));
        assert!(ctx.history().is_empty());
        assert!(ctx.recipe().is_none());
    }

    #[tokio::test]
    async fn test_followup_turn_answers_and_preserves_recipe() {
        let mut llm = FakeProvider::new();
        llm.add_response("routing layer", "followup");
        llm.add_response(
            "already received this recipe",
            "Coconut cream swaps in for the yogurt one-to-one.",
        );
        let mut ctx = ConversationContext::new();
        ctx.record_recipe(vindaloo());
        let before = ctx.recipe().cloned();

        let outcome = handle_turn(
            &llm,
            TurnRequest::new("can I make it without yogurt?"),
            &mut ctx,
        )
        .await
        .unwrap();

        assert_eq!(outcome.intent, Intent::Followup);
        assert_eq!(outcome.reply, "Coconut cream swaps in for the yogurt one-to-one.");
        // The stored recipe must come through the turn byte-identical.
        assert_eq!(ctx.recipe().cloned(), before);
        assert_eq!(ctx.history().len(), 1);
    }

    #[tokio::test]
    async fn test_followup_without_context_fails() {
        let llm = FakeProvider::with_response("routing layer", "followup");
        let mut ctx = ConversationContext::new();

        let err = handle_turn(&llm, TurnRequest::new("what about the sauce?"), &mut ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::MissingParameter { name: "dish_name" }));
    }

    #[tokio::test]
    async fn test_followup_with_name_but_no_recipe_fails() {
        let llm = FakeProvider::with_response("routing layer", "followup");
        let mut ctx = ConversationContext::new();
        ctx.record_suggestion("Chicken Vindaloo");

        let err = handle_turn(&llm, TurnRequest::new("what about the sauce?"), &mut ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::MissingParameter { name: "recipe_text" }));
        assert!(ctx.history().is_empty());
    }

    #[tokio::test]
    async fn test_failed_recipe_stage_leaves_context_untouched() {
        // No recipe response registered: the recipe stage fails.
        let llm = FakeProvider::with_response("routing layer", "recipe");
        let mut ctx = ConversationContext::new();
        ctx.record_suggestion("Chicken Vindaloo");

        let err = handle_turn(&llm, TurnRequest::new("give me the recipe"), &mut ctx)
            .await
            .unwrap_err();

        assert!(matches!(err, ChatError::Model(_)));
        assert_eq!(ctx.dish_name(), Some("Chicken Vindaloo"));
        assert!(ctx.recipe().is_none());
        assert!(ctx.history().is_empty());
    }

    #[tokio::test]
    async fn test_failed_extraction_discards_recipe_text() {
        // The recipe stage succeeds but ingredient extraction has no
        // response; the generated text must not be committed.
        let mut llm = FakeProvider::new();
        llm.add_response("routing layer", "recipe");
        llm.add_response("cooking expert", VINDALOO_RECIPE);
        let mut ctx = ConversationContext::new();
        ctx.record_suggestion("Chicken Vindaloo");

        let err = handle_turn(&llm, TurnRequest::new("give me the recipe"), &mut ctx)
            .await
            .unwrap_err();

        assert!(matches!(err, ChatError::Model(_)));
        assert!(ctx.recipe().is_none());
        assert!(ctx.history().is_empty());
    }

    #[tokio::test]
    async fn test_classification_failure_is_distinct() {
        let llm = FakeProvider::new();
        let mut ctx = ConversationContext::new();

        let err = handle_turn(&llm, TurnRequest::new("hello"), &mut ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Classification { .. }));
    }

    #[tokio::test]
    async fn test_router_sees_prior_recipe_flag() {
        let mut llm = FakeProvider::new();
        // Route on the context line itself, not the category marker: the
        // same provider routes differently depending on stored state.
        llm.add_response("No recipe has been shared", "dish_suggestion");
        llm.add_response("A recipe has already been shared", "followup");
        llm.add_response("pick what to cook", "Try Chicken Vindaloo!");
        llm.add_response("bare dish name", "Chicken Vindaloo");
        llm.add_response("already received this recipe", "Yes, more chilies work.");

        let mut fresh = ConversationContext::new();
        let outcome = handle_turn(&llm, TurnRequest::new("food?"), &mut fresh)
            .await
            .unwrap();
        assert_eq!(outcome.intent, Intent::DishSuggestion);

        let mut seeded = ConversationContext::new();
        seeded.record_recipe(vindaloo());
        let outcome = handle_turn(&llm, TurnRequest::new("spicier?"), &mut seeded)
            .await
            .unwrap();
        assert_eq!(outcome.intent, Intent::Followup);
    }
}
