//! Article command handlers.

use std::sync::Arc;

use tabled::Tabled;

use backlot_api::types::{CreateArticleRequest, UpdateArticleRequest};
use backlot_core::{Article, ArticleOps, ArticleStatus, EntityId, ResourceOps};

use crate::cli::{ArticlesArgs, ArticlesCommand, GlobalOpts};
use crate::commands::{Context, controller_for, coordinator_for, util};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ArticleRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Locale")]
    locale: String,
    #[tabled(rename = "Published")]
    published: String,
}

impl From<&Article> for ArticleRow {
    fn from(a: &Article) -> Self {
        Self {
            id: a.id.to_string(),
            title: a.title.clone(),
            status: a.status.to_string(),
            locale: a.locale.clone().unwrap_or_else(|| "-".into()),
            published: a
                .published_at
                .map_or_else(|| "-".to_owned(), |t| t.format("%Y-%m-%d").to_string()),
        }
    }
}

fn detail(a: &Article) -> String {
    format!(
        "ID:         {}\nTitle:      {}\nSlug:       {}\nStatus:     {}\nLocale:     {}\nPublished:  {}",
        a.id,
        a.title,
        a.slug,
        a.status,
        a.locale.as_deref().unwrap_or("-"),
        a.published_at
            .map_or_else(|| "-".to_owned(), |t| t.to_rfc3339()),
    )
}

fn validate_status(status: &str) -> Result<String, CliError> {
    let parsed: ArticleStatus = status.parse().map_err(|_| CliError::Validation {
        field: "status".into(),
        reason: format!("expected DRAFT, PUBLISHED, or ARCHIVED, got '{status}'"),
    })?;
    Ok(parsed.to_string())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    args: ArticlesArgs,
    ctx: &Context,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let ops = Arc::new(ArticleOps::new(Arc::clone(&ctx.client)));

    match args.command {
        ArticlesCommand::List {
            opts,
            status,
            locale,
        } => {
            let controller = controller_for(
                Arc::clone(&ops),
                &opts,
                &[("status", status), ("locale", locale)],
            )?;
            let page = controller.load().await?;

            let out = output::render_list(&global.output, &page.items, |a| ArticleRow::from(a), |a| {
                a.id.to_string()
            });
            output::print_output(&out, global.quiet);
            output::print_page_footer(&global.output, &controller.snapshot(), global.quiet);
            Ok(())
        }

        ArticlesCommand::Get { id } => {
            let article = ops.fetch(&EntityId::from(id.as_str())).await?;
            let out = output::render_single(&global.output, &article, detail, |a| a.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ArticlesCommand::Create {
            title,
            slug,
            status,
            locale,
            body,
        } => {
            let coordinator = coordinator_for(Arc::clone(&ops), global);
            let input = CreateArticleRequest {
                slug: slug.unwrap_or_else(|| util::slugify(&title)),
                title,
                status: validate_status(&status)?,
                locale,
                body,
            };

            let created = coordinator.create(input).await?;
            let out = output::render_single(&global.output, &created, detail, |a| a.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ArticlesCommand::Update {
            id,
            title,
            slug,
            status,
            locale,
            body,
        } => {
            let coordinator = coordinator_for(Arc::clone(&ops), global);
            let input = UpdateArticleRequest {
                title,
                slug,
                status: status.as_deref().map(validate_status).transpose()?,
                locale,
                body,
            };

            let updated = coordinator
                .update(&EntityId::from(id.as_str()), input)
                .await?;
            let out = output::render_single(&global.output, &updated, detail, |a| a.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ArticlesCommand::Delete { id } => {
            util::confirm(&format!("article {id}"), global)?;
            let coordinator = coordinator_for(ops, global);
            coordinator.delete(&EntityId::from(id.as_str())).await?;
            Ok(())
        }
    }
}
