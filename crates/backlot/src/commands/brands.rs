//! Brand command handlers.

use std::sync::Arc;

use tabled::Tabled;

use backlot_api::types::{CreateBrandRequest, UpdateBrandRequest};
use backlot_core::{Brand, BrandOps, EntityId, ResourceOps};

use crate::cli::{BrandsArgs, BrandsCommand, GlobalOpts};
use crate::commands::{Context, controller_for, coordinator_for, util};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct BrandRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Active")]
    active: &'static str,
}

impl From<&Brand> for BrandRow {
    fn from(b: &Brand) -> Self {
        Self {
            id: b.id.to_string(),
            name: b.name.clone(),
            slug: b.slug.clone(),
            active: if b.is_active { "yes" } else { "no" },
        }
    }
}

fn detail(b: &Brand) -> String {
    format!(
        "ID:      {}\nName:    {}\nSlug:    {}\nLogo:    {}\nActive:  {}",
        b.id,
        b.name,
        b.slug,
        b.logo_url.as_deref().unwrap_or("-"),
        if b.is_active { "yes" } else { "no" },
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: BrandsArgs, ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    let ops = Arc::new(BrandOps::new(Arc::clone(&ctx.client)));

    match args.command {
        BrandsCommand::List { opts, active } => {
            let controller = controller_for(
                Arc::clone(&ops),
                &opts,
                &[("isActive", active.map(|b| b.to_string()))],
            )?;
            let page = controller.load().await?;

            let out = output::render_list(&global.output, &page.items, |b| BrandRow::from(b), |b| {
                b.id.to_string()
            });
            output::print_output(&out, global.quiet);
            output::print_page_footer(&global.output, &controller.snapshot(), global.quiet);
            Ok(())
        }

        BrandsCommand::Get { id } => {
            let brand = ops.fetch(&EntityId::from(id.as_str())).await?;
            let out = output::render_single(&global.output, &brand, detail, |b| b.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BrandsCommand::Create {
            name,
            slug,
            logo_url,
            inactive,
        } => {
            let coordinator = coordinator_for(Arc::clone(&ops), global);
            let input = CreateBrandRequest {
                slug: slug.unwrap_or_else(|| util::slugify(&name)),
                name,
                logo_url,
                is_active: !inactive,
            };

            let created = coordinator.create(input).await?;
            let out = output::render_single(&global.output, &created, detail, |b| b.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BrandsCommand::Update {
            id,
            name,
            slug,
            logo_url,
            active,
        } => {
            let coordinator = coordinator_for(Arc::clone(&ops), global);
            let input = UpdateBrandRequest {
                name,
                slug,
                logo_url,
                is_active: active,
            };

            let updated = coordinator
                .update(&EntityId::from(id.as_str()), input)
                .await?;
            let out = output::render_single(&global.output, &updated, detail, |b| b.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BrandsCommand::Delete { id } => {
            util::confirm(&format!("brand {id}"), global)?;
            let coordinator = coordinator_for(ops, global);
            coordinator.delete(&EntityId::from(id.as_str())).await?;
            Ok(())
        }
    }
}
