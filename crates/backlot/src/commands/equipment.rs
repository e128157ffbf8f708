//! Equipment command handlers.

use std::sync::Arc;

use tabled::Tabled;

use backlot_api::types::{CreateEquipmentRequest, UpdateEquipmentRequest};
use backlot_core::{EntityId, EquipmentItem, EquipmentOps, EquipmentStatus, ResourceOps};

use crate::cli::{EquipmentArgs, EquipmentCommand, GlobalOpts};
use crate::commands::{Context, controller_for, coordinator_for, util};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct EquipmentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Rate/day")]
    rate: String,
    #[tabled(rename = "Active")]
    active: &'static str,
}

fn format_rate(cents: Option<i64>) -> String {
    cents.map_or_else(
        || "-".to_owned(),
        |c| format!("${}.{:02}", c / 100, (c % 100).abs()),
    )
}

impl From<&EquipmentItem> for EquipmentRow {
    fn from(e: &EquipmentItem) -> Self {
        Self {
            id: e.id.to_string(),
            name: e.name.clone(),
            status: e.status.to_string(),
            rate: format_rate(e.daily_rate_cents),
            active: if e.is_active { "yes" } else { "no" },
        }
    }
}

fn detail(e: &EquipmentItem) -> String {
    format!(
        "ID:        {}\nName:      {}\nStatus:    {}\nBrand:     {}\nCategory:  {}\nRate/day:  {}\nActive:    {}",
        e.id,
        e.name,
        e.status,
        e.brand_id
            .as_ref()
            .map_or_else(|| "-".to_owned(), ToString::to_string),
        e.category_id
            .as_ref()
            .map_or_else(|| "-".to_owned(), ToString::to_string),
        format_rate(e.daily_rate_cents),
        if e.is_active { "yes" } else { "no" },
    )
}

fn validate_status(status: &str) -> Result<String, CliError> {
    let parsed: EquipmentStatus = status.parse().map_err(|_| CliError::Validation {
        field: "status".into(),
        reason: format!("expected AVAILABLE, RENTED, MAINTENANCE, or RETIRED, got '{status}'"),
    })?;
    Ok(parsed.to_string())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    args: EquipmentArgs,
    ctx: &Context,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let ops = Arc::new(EquipmentOps::new(Arc::clone(&ctx.client)));

    match args.command {
        EquipmentCommand::List {
            opts,
            status,
            brand,
            active,
        } => {
            let controller = controller_for(
                Arc::clone(&ops),
                &opts,
                &[
                    ("status", status),
                    ("brandId", brand),
                    ("isActive", active.map(|b| b.to_string())),
                ],
            )?;
            let page = controller.load().await?;

            let out = output::render_list(&global.output, &page.items, |e| EquipmentRow::from(e), |e| {
                e.id.to_string()
            });
            output::print_output(&out, global.quiet);
            output::print_page_footer(&global.output, &controller.snapshot(), global.quiet);
            Ok(())
        }

        EquipmentCommand::Get { id } => {
            let item = ops.fetch(&EntityId::from(id.as_str())).await?;
            let out = output::render_single(&global.output, &item, detail, |e| e.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EquipmentCommand::Create {
            name,
            brand,
            category,
            status,
            daily_rate,
            inactive,
        } => {
            let coordinator = coordinator_for(Arc::clone(&ops), global);
            let input = CreateEquipmentRequest {
                name,
                brand_id: brand,
                category_id: category,
                status: validate_status(&status)?,
                daily_rate_cents: daily_rate,
                is_active: !inactive,
            };

            let created = coordinator.create(input).await?;
            let out = output::render_single(&global.output, &created, detail, |e| e.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EquipmentCommand::Update {
            id,
            name,
            brand,
            category,
            status,
            daily_rate,
            active,
        } => {
            let coordinator = coordinator_for(Arc::clone(&ops), global);
            let input = UpdateEquipmentRequest {
                name,
                brand_id: brand,
                category_id: category,
                status: status.as_deref().map(validate_status).transpose()?,
                daily_rate_cents: daily_rate,
                is_active: active,
            };

            let updated = coordinator
                .update(&EntityId::from(id.as_str()), input)
                .await?;
            let out = output::render_single(&global.output, &updated, detail, |e| e.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EquipmentCommand::Delete { id } => {
            util::confirm(&format!("equipment {id}"), global)?;
            let coordinator = coordinator_for(ops, global);
            coordinator.delete(&EntityId::from(id.as_str())).await?;
            Ok(())
        }
    }
}
