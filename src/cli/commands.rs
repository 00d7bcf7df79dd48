use anyhow::{anyhow, Context};
use serde_json::json;

use crate::cli::utils::{display_base, output};
use crate::cli::OutputFormat;
use crate::navigation::{LegacyShim, Page, PageHost, RecordingNavigator, TenantContext, TenantId};

pub fn context(path: &str, output_format: &OutputFormat) -> anyhow::Result<()> {
    let ctx = TenantContext::from_path(path);
    let text = match ctx.tenant_id() {
        Some(tenant) => format!("tenant: {}\nbase:   {}", tenant, ctx.base_path()),
        None => format!("tenant: (none)\nbase:   {}", display_base(ctx.base_path())),
    };
    output(output_format, &text, &ctx)
}

pub fn route(page: &str, path: &str, view: &str, output_format: &OutputFormat) -> anyhow::Result<()> {
    let page: Page = page.parse().context("choose one of dashboard, documents, finance, schedule")?;
    let mut host = PageHost::mount(page, path, RecordingNavigator::new());
    let location = host.on_navigate(view);

    output(
        output_format,
        &location,
        &json!({
            "page": page,
            "view": view,
            "base_path": host.tenant().base_path(),
            "location": location,
        }),
    )
}

pub fn views(page: &str, path: &str, output_format: &OutputFormat) -> anyhow::Result<()> {
    let page: Page = page.parse().context("choose one of dashboard, documents, finance, schedule")?;
    let host = PageHost::mount(page, path, RecordingNavigator::new());
    let map = host.view_map();

    let width = map.views.iter().map(|entry| entry.view.len()).max().unwrap_or(0);
    let mut text: Vec<String> = map
        .views
        .iter()
        .map(|entry| format!("{:width$}  {}", entry.view, entry.route, width = width))
        .collect();
    text.push(format!("{:width$}  {}", "*", map.default, width = width));

    output(output_format, &text.join("\n"), &map)
}

pub fn shim(parent: &str, tenant: Option<&str>, output_format: &OutputFormat) -> anyhow::Result<()> {
    let shim = LegacyShim::from_segment(parent)
        .ok_or_else(|| anyhow!("'{}' is not a legacy route (expected documents or finance)", parent))?;

    let target = match tenant {
        Some(id) => {
            let tenant_id = TenantId::new(id).ok_or_else(|| anyhow!("invalid tenant id '{}'", id))?;
            shim.target(&tenant_id)
        }
        None => shim.target_in(&TenantContext::unscoped()),
    };

    output(output_format, &target, &json!({ "shim": shim, "target": target }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_page_is_an_error() {
        assert!(route("billing", "/", "dashboard", &OutputFormat::Json).is_err());
    }

    #[test]
    fn unknown_shim_is_an_error() {
        assert!(shim("schedule", None, &OutputFormat::Text).is_err());
        assert!(shim("finance", Some("a/b"), &OutputFormat::Text).is_err());
    }
}
