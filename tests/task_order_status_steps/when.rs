//! When steps for task order status BDD scenarios.

use super::world::{TaskOrderWorld, run_async};
use clinledger::task_order::services::SignTaskOrderRequest;
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#"the task order is signed by "{signer}""#)]
fn sign_task_order(world: &mut TaskOrderWorld, signer: String) -> Result<(), eyre::Report> {
    let id = world.current()?.id();
    let signed = run_async(world.service.sign(SignTaskOrderRequest::new(id, signer)))
        .wrap_err("sign task order")?;
    world.task_order = Some(signed);
    Ok(())
}

#[when("the task order is updated with no CLINs")]
fn update_without_clins(world: &mut TaskOrderWorld) -> Result<(), eyre::Report> {
    let request = world.preserving_update()?;
    let updated = run_async(world.service.update(request)).wrap_err("update task order")?;
    world.task_order = Some(updated);
    Ok(())
}
