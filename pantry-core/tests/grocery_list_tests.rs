//! End-to-end tests for the tag -> ingredient -> grocery list path.
//!
//! Exercises the full pipeline the way the CLI drives it: BILUO-tagged
//! tokens are decoded into spans, spans become ingredients, and ingredients
//! from several recipes merge into one list.

use pantry_core::biluo::Biluo;
use pantry_core::{GroceryList, Recipe, TaggedLine, TaggedToken};

fn token(label: &str, start: usize, end: usize, tag: Biluo) -> TaggedToken {
    TaggedToken {
        label: label.to_string(),
        start,
        end,
        tag,
    }
}

fn line(text: &str, tokens: Vec<TaggedToken>) -> TaggedLine {
    TaggedLine {
        text: text.to_string(),
        tokens,
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn aggregates_tagged_lines_into_grocery_list() {
    let lines = vec![
        // "1 1/2 cups flour": the quantity is a two-token span.
        line(
            "1 1/2 cups flour",
            vec![
                token("Quantity", 0, 1, Biluo::Begin),
                token("Quantity", 2, 5, Biluo::Last),
                token("Unit", 6, 10, Biluo::Unit),
                token("Ingredient", 11, 16, Biluo::Unit),
            ],
        ),
        line(
            "2 tbsp sugar",
            vec![
                token("Quantity", 0, 1, Biluo::Unit),
                token("Unit", 2, 6, Biluo::Unit),
                token("Ingredient", 7, 12, Biluo::Unit),
            ],
        ),
        line(
            "1/2 cup sugar",
            vec![
                token("Quantity", 0, 3, Biluo::Unit),
                token("Unit", 4, 7, Biluo::Unit),
                token("Ingredient", 8, 13, Biluo::Unit),
            ],
        ),
    ];

    let recipe = Recipe::from_tagged_lines("Sugar Cookies", "example.com", None, vec![], &lines);
    assert_eq!(recipe.ingredients.len(), 3);

    let list = GroceryList::merge(recipe.ingredients);
    assert_eq!(list.len(), 2);

    let flour = list.get("flour").expect("flour entry");
    assert_close(flour.quantity.unwrap(), 1.5);
    assert_eq!(flour.unit.as_deref(), Some("cup"));

    // 2 tbsp + 1/2 cup = 0.625 cup: tbsp -> cup shrinks, so the sum is in cups.
    let sugar = list.get("sugar").expect("sugar entry");
    assert_close(sugar.quantity.unwrap(), 0.625);
    assert_eq!(sugar.unit.as_deref(), Some("cup"));
}

#[test]
fn merges_ingredients_across_recipes() {
    let cookie_lines = vec![line(
        "1 cup butter",
        vec![
            token("Quantity", 0, 1, Biluo::Unit),
            token("Unit", 2, 5, Biluo::Unit),
            token("Ingredient", 6, 12, Biluo::Unit),
        ],
    )];
    let cake_lines = vec![line(
        "113 g butter",
        vec![
            token("Quantity", 0, 3, Biluo::Unit),
            token("Unit", 4, 5, Biluo::Unit),
            token("Ingredient", 6, 12, Biluo::Unit),
        ],
    )];

    let cookies = Recipe::from_tagged_lines("Cookies", "a.example", None, vec![], &cookie_lines);
    let cake = Recipe::from_tagged_lines("Cake", "b.example", None, vec![], &cake_lines);

    let all = cookies.ingredients.into_iter().chain(cake.ingredients);
    let list = GroceryList::merge(all);

    // Butter has a density entry (227 g/cup), so the two merge into one.
    assert_eq!(list.len(), 1);
    let butter = list.get("butter").expect("butter entry");
    assert_eq!(butter.unit.as_deref(), Some("cup"));
    assert_close(butter.quantity.unwrap(), 1.0 + 113.0 / 227.0);
}

#[test]
fn unmergeable_ingredient_is_never_lost() {
    let lines = vec![
        line(
            "1 cup salt",
            vec![
                token("Quantity", 0, 1, Biluo::Unit),
                token("Unit", 2, 5, Biluo::Unit),
                token("Ingredient", 6, 10, Biluo::Unit),
            ],
        ),
        line(
            "1 g salt",
            vec![
                token("Quantity", 0, 1, Biluo::Unit),
                token("Unit", 2, 3, Biluo::Unit),
                token("Ingredient", 4, 8, Biluo::Unit),
            ],
        ),
    ];

    let recipe = Recipe::from_tagged_lines("Brine", "example.com", None, vec![], &lines);
    let list = GroceryList::merge(recipe.ingredients);

    assert_eq!(list.len(), 2);
    assert!(list.get("salt").is_some());
    assert!(list.get("salt*").is_some());

    // Both survive into the serialized list as their verbatim lines.
    let text = list.to_text();
    assert!(text.contains("1 cup salt"));
    assert!(text.contains("1 g salt"));
}
