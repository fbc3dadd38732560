//! When steps for item completion BDD scenarios.

use super::world::{ItemCompletionWorld, run_async};
use rstest_bdd_macros::when;
use tasktree::todo::services::CreateItemRequest;

#[when(r#"the user completes "{content}""#)]
fn complete_item(world: &mut ItemCompletionWorld, content: String) -> Result<(), eyre::Report> {
    let user_id = world.user()?.id();
    let item_id = world.item(&content)?.id();
    let result = run_async(world.app.items().complete_item(user_id, item_id));
    world.last_completion = Some(result);
    Ok(())
}

#[when(r#"the user adds "{content}" under "{parent}""#)]
fn add_nested_item(
    world: &mut ItemCompletionWorld,
    content: String,
    parent: String,
) -> Result<(), eyre::Report> {
    let user_id = world.user()?.id();
    let request = CreateItemRequest::new(world.list()?.id(), content.as_str())
        .with_parent(world.item(&parent)?.id());
    let result = run_async(world.app.items().create_item(user_id, request));
    world.last_creation = Some(result);
    Ok(())
}
