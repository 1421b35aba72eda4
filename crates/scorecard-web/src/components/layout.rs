//! Full HTML document around a rendered page

use super::blocks::PageBody;
use crate::pages::APP_TITLE;
use crate::session::NO_CLIENT_SENTINEL;
use crate::views::{Block, ClientSummary, Rendered, Sidebar};
use leptos::prelude::*;
use scorecard_core::ClientIdentifierList;

/// Form target of the client selector
pub const SELECT_CLIENT_PATH: &str = "/client";
/// Form target of the reload button
pub const RELOAD_PATH: &str = "/session/reload";

const STYLE: &str = "\
body { margin: 0; font-family: sans-serif; display: flex; color: #262730; }
aside { width: 300px; min-height: 100vh; padding: 1.5rem; background: #f0f2f6; box-sizing: border-box; }
main { flex: 1; padding: 2rem 3rem; }
nav a { display: block; padding: .3rem 0; color: #262730; }
nav a.active { font-weight: bold; }
.warning { padding: 1rem; background: #fffce7; border-left: 4px solid #ffbd45; }
.spacer { height: 2rem; }
figure.chart { margin: 1rem 0; }
";

/// Render the complete document for `rendered`
pub fn render_document(rendered: &Rendered, identifiers: &ClientIdentifierList) -> String {
    let page_label = rendered.page.label();
    let sidebar = rendered.sidebar.clone();
    let body = rendered.body.clone();
    let identifiers: Vec<String> = identifiers.iter().map(str::to_string).collect();

    let html = Owner::new().with(|| {
        view! { <Document page_label sidebar body identifiers /> }.to_html()
    });
    format!("<!DOCTYPE html>\n{html}")
}

#[component]
fn Document(
    page_label: &'static str,
    sidebar: Sidebar,
    body: Vec<Block>,
    identifiers: Vec<String>,
) -> impl IntoView {
    view! {
        <html lang="fr">
            <head>
                <meta charset="utf-8" />
                <title>{format!("{APP_TITLE} - {page_label}")}</title>
                <style>{STYLE}</style>
            </head>
            <body>
                <SidebarPanel sidebar identifiers />
                <main>
                    <h1>{APP_TITLE}</h1>
                    <h2>{page_label}</h2>
                    <PageBody blocks=body />
                </main>
            </body>
        </html>
    }
}

/// Navigation, client selector and the selected client's summary
#[component]
pub fn SidebarPanel(
    /// Sidebar description
    sidebar: Sidebar,
    /// Identifiers offered by the selector
    identifiers: Vec<String>,
) -> impl IntoView {
    let Sidebar {
        nav,
        selected,
        client_info,
    } = sidebar;

    let links = nav
        .into_iter()
        .map(|item| {
            let class = if item.active { "active" } else { "" };
            view! { <a href={item.path} class={class}>{item.label}</a> }
        })
        .collect::<Vec<_>>();

    let options = identifiers
        .into_iter()
        .map(|id| {
            let is_selected = selected.as_deref() == Some(id.as_str());
            let value = id.clone();
            view! { <option value={value} selected={is_selected}>{id}</option> }
        })
        .collect::<Vec<_>>();

    let reload = selected.is_some().then(|| {
        view! {
            <form method="post" action={RELOAD_PATH}>
                <button type="submit">"Recharger"</button>
            </form>
        }
    });

    view! {
        <aside>
            <h2>"Navigation"</h2>
            <nav aria-label="Choisissez une page">{links}</nav>
            <form method="post" action={SELECT_CLIENT_PATH} class="client-selector">
                <label for="client_id">"Sélectionner un ID client..."</label>
                <select id="client_id" name="client_id" onchange="this.form.submit()">
                    <option value={NO_CLIENT_SENTINEL} selected={selected.is_none()}>
                        {NO_CLIENT_SENTINEL}
                    </option>
                    {options}
                </select>
                <noscript>
                    <button type="submit">"OK"</button>
                </noscript>
            </form>
            {reload}
            {client_info.map(|info| view! { <ClientInfo info /> })}
        </aside>
    }
}

#[component]
fn ClientInfo(info: ClientSummary) -> impl IntoView {
    view! {
        <section class="client-info">
            <h3>{info.heading}</h3>
            {info
                .lines
                .into_iter()
                .map(|line| {
                    view! {
                        <p><strong>{format!("{} :", line.label)}</strong>{format!(" {}", line.value)}</p>
                    }
                })
                .collect::<Vec<_>>()}
        </section>
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use crate::pages::{self, PageInput, RenderContext, fixtures};
    use crate::session::{Page, Session};
    use scorecard_core::ReferenceDataset;

    fn identifiers() -> ClientIdentifierList {
        ClientIdentifierList::new(["100002", "100003"])
    }

    fn document(session: &Session, input: &PageInput) -> String {
        let reference = ReferenceDataset::default();
        let rendered = pages::render(
            &RenderContext {
                session,
                reference: &reference,
                threshold: 0.46,
            },
            input,
        );
        render_document(&rendered, &identifiers())
    }

    #[test]
    fn test_empty_session_selects_sentinel() {
        let html = document(&Session::new(), &PageInput::view(Page::Scoring));

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<html lang=\"fr\">"));
        assert!(html.contains("<h1>Scoring Crédit Bancaire</h1>"));
        assert!(html.contains("value=\"Sélectionner...\" selected"));
        assert!(html.contains("<option value=\"100002\">100002</option>"));
        assert!(html.contains("href=\"/scoring\" class=\"active\""));
        assert!(!html.contains("Recharger"));
        assert!(!html.contains("Informations Client"));
        assert!(html.contains("Veuillez sélectionner un ID client"));
    }

    #[test]
    fn test_selected_client_shows_summary() {
        let session = Session {
            selected: Some("100002".to_string()),
            record: Some(fixtures::record()),
            ..Session::default()
        };

        let html = document(&session, &PageInput::view(Page::Importance));

        assert!(html.contains("value=\"100002\" selected"));
        assert!(html.contains("<option value=\"Sélectionner...\">"));
        assert!(html.contains("<h3>Informations Client</h3>"));
        assert!(html.contains("<strong>Âge :</strong> 25.9 ans"));
        assert!(html.contains("<strong>Ancienneté emploi :</strong> Non renseigné"));
        assert!(html.contains("action=\"/session/reload\""));
        assert!(html.contains("href=\"/importance\" class=\"active\""));
        assert!(html.find("<aside>").unwrap() < html.find("<main>").unwrap());
    }
}
