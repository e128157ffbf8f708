//! Staff command handlers.

use std::sync::Arc;

use tabled::Tabled;

use backlot_api::types::{CreateStaffRequest, UpdateStaffRequest};
use backlot_core::{EntityId, ResourceOps, StaffMember, StaffOps};

use crate::cli::{GlobalOpts, StaffArgs, StaffCommand};
use crate::commands::{Context, controller_for, coordinator_for, util};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct StaffRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Active")]
    active: &'static str,
}

impl From<&StaffMember> for StaffRow {
    fn from(s: &StaffMember) -> Self {
        Self {
            id: s.id.to_string(),
            name: s.name.clone(),
            role: s.role.clone(),
            email: s.email.clone().unwrap_or_else(|| "-".into()),
            active: if s.is_active { "yes" } else { "no" },
        }
    }
}

fn detail(s: &StaffMember) -> String {
    format!(
        "ID:      {}\nName:    {}\nRole:    {}\nEmail:   {}\nActive:  {}",
        s.id,
        s.name,
        s.role,
        s.email.as_deref().unwrap_or("-"),
        if s.is_active { "yes" } else { "no" },
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: StaffArgs, ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    let ops = Arc::new(StaffOps::new(Arc::clone(&ctx.client)));

    match args.command {
        StaffCommand::List { opts, active } => {
            let controller = controller_for(
                Arc::clone(&ops),
                &opts,
                &[("isActive", active.map(|b| b.to_string()))],
            )?;
            let page = controller.load().await?;

            let out = output::render_list(&global.output, &page.items, |s| StaffRow::from(s), |s| {
                s.id.to_string()
            });
            output::print_output(&out, global.quiet);
            output::print_page_footer(&global.output, &controller.snapshot(), global.quiet);
            Ok(())
        }

        StaffCommand::Get { id } => {
            let member = ops.fetch(&EntityId::from(id.as_str())).await?;
            let out = output::render_single(&global.output, &member, detail, |s| s.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        StaffCommand::Create {
            name,
            role,
            email,
            inactive,
        } => {
            let coordinator = coordinator_for(Arc::clone(&ops), global);
            let input = CreateStaffRequest {
                name,
                role,
                email,
                is_active: !inactive,
            };

            let created = coordinator.create(input).await?;
            let out = output::render_single(&global.output, &created, detail, |s| s.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        StaffCommand::Update {
            id,
            name,
            role,
            email,
            active,
        } => {
            let coordinator = coordinator_for(Arc::clone(&ops), global);
            let input = UpdateStaffRequest {
                name,
                role,
                email,
                is_active: active,
            };

            let updated = coordinator
                .update(&EntityId::from(id.as_str()), input)
                .await?;
            let out = output::render_single(&global.output, &updated, detail, |s| s.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        StaffCommand::Delete { id } => {
            util::confirm(&format!("staff member {id}"), global)?;
            let coordinator = coordinator_for(ops, global);
            coordinator.delete(&EntityId::from(id.as_str())).await?;
            Ok(())
        }
    }
}
