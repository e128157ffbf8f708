//! Category command handlers.

use std::sync::Arc;

use tabled::Tabled;

use backlot_api::types::{CreateCategoryRequest, UpdateCategoryRequest};
use backlot_core::{Category, CategoryKind, CategoryOps, EntityId, ResourceOps};

use crate::cli::{CategoriesArgs, CategoriesCommand, GlobalOpts};
use crate::commands::{Context, controller_for, coordinator_for, util};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Kind")]
    kind: String,
}

impl From<&Category> for CategoryRow {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.name.clone(),
            slug: c.slug.clone(),
            kind: c.kind.to_string(),
        }
    }
}

fn detail(c: &Category) -> String {
    format!(
        "ID:    {}\nName:  {}\nSlug:  {}\nKind:  {}",
        c.id, c.name, c.slug, c.kind,
    )
}

fn validate_kind(kind: &str) -> Result<String, CliError> {
    let parsed: CategoryKind = kind.parse().map_err(|_| CliError::Validation {
        field: "kind".into(),
        reason: format!("expected EQUIPMENT or ARTICLE, got '{kind}'"),
    })?;
    Ok(parsed.to_string())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    args: CategoriesArgs,
    ctx: &Context,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let ops = Arc::new(CategoryOps::new(Arc::clone(&ctx.client)));

    match args.command {
        CategoriesCommand::List { opts, kind } => {
            let controller = controller_for(Arc::clone(&ops), &opts, &[("kind", kind)])?;
            let page = controller.load().await?;

            let out = output::render_list(&global.output, &page.items, |c| CategoryRow::from(c), |c| {
                c.id.to_string()
            });
            output::print_output(&out, global.quiet);
            output::print_page_footer(&global.output, &controller.snapshot(), global.quiet);
            Ok(())
        }

        CategoriesCommand::Get { id } => {
            let category = ops.fetch(&EntityId::from(id.as_str())).await?;
            let out =
                output::render_single(&global.output, &category, detail, |c| c.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CategoriesCommand::Create { name, slug, kind } => {
            let coordinator = coordinator_for(Arc::clone(&ops), global);
            let input = CreateCategoryRequest {
                slug: slug.unwrap_or_else(|| util::slugify(&name)),
                name,
                kind: validate_kind(&kind)?,
            };

            let created = coordinator.create(input).await?;
            let out = output::render_single(&global.output, &created, detail, |c| c.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CategoriesCommand::Update {
            id,
            name,
            slug,
            kind,
        } => {
            let coordinator = coordinator_for(Arc::clone(&ops), global);
            let input = UpdateCategoryRequest {
                name,
                slug,
                kind: kind.as_deref().map(validate_kind).transpose()?,
            };

            let updated = coordinator
                .update(&EntityId::from(id.as_str()), input)
                .await?;
            let out = output::render_single(&global.output, &updated, detail, |c| c.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CategoriesCommand::Delete { id } => {
            util::confirm(&format!("category {id}"), global)?;
            let coordinator = coordinator_for(ops, global);
            coordinator.delete(&EntityId::from(id.as_str())).await?;
            Ok(())
        }
    }
}
