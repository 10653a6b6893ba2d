//! Given steps for task order status BDD scenarios.

use super::world::{TaskOrderWorld, as_new_clin, parse_date, run_async};
use clinledger::task_order::{
    domain::{Attachment, ClinNumber, JediClinType, NewClin},
    services::CreateTaskOrderRequest,
};
use eyre::WrapErr;
use rust_decimal::Decimal;
use rstest_bdd_macros::given;

#[given(r#"today is "{date}""#)]
fn today_is(world: &mut TaskOrderWorld, date: String) -> Result<(), eyre::Report> {
    *world = TaskOrderWorld::on(parse_date(&date)?);
    Ok(())
}

#[given("a new task order with no details")]
fn new_task_order(world: &mut TaskOrderWorld) -> Result<(), eyre::Report> {
    let created = run_async(
        world
            .service
            .create(CreateTaskOrderRequest::new(world.portfolio_id)),
    )
    .wrap_err("create empty task order")?;
    world.task_order = Some(created);
    Ok(())
}

#[given(r#"a task order numbered "{number}" with a signed PDF"#)]
fn numbered_task_order(world: &mut TaskOrderWorld, number: String) -> Result<(), eyre::Report> {
    let pdf = Attachment::new("task_order.pdf", format!("uploads/{number}.pdf"));
    let request = CreateTaskOrderRequest::new(world.portfolio_id)
        .with_number(number)
        .with_pdf(pdf);
    let created = run_async(world.service.create(request)).wrap_err("create task order")?;
    world.task_order = Some(created);
    Ok(())
}

#[given(r#"the task order has a complete CLIN "{number}" from "{start}" to "{end}""#)]
fn add_complete_clin(
    world: &mut TaskOrderWorld,
    number: String,
    start: String,
    end: String,
) -> Result<(), eyre::Report> {
    let clin = NewClin::new(
        ClinNumber::new(number).wrap_err("scenario CLIN number")?,
        parse_date(&start)?,
        parse_date(&end)?,
    )
    .with_amounts(Decimal::new(100_000, 0), Decimal::new(40_000, 0))
    .with_jedi_clin_type(JediClinType::Clin1);

    let mut clins: Vec<NewClin> = world.current()?.clins().iter().map(as_new_clin).collect();
    clins.push(clin);
    let request = world.preserving_update()?.with_clins(clins);
    let updated = run_async(world.service.update(request)).wrap_err("add CLIN to task order")?;
    world.task_order = Some(updated);
    Ok(())
}
