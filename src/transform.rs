// src/transform.rs
//
// The one-shot rewrite of the simulator page:
//
// - Lift the six panels out of a working copy, replacing each by a
//   placeholder comment so later lookups never see it again.
// - Lift the button group (shallow match: up to the first `</div>`).
// - Locate the input panel's content: from just after `<div class="panel">`
//   to the last `</div>` before the results column comment.
// - Reuse the first panel's indentation (falls back to six tabs).
// - Replace that content with the two-column section.
//
// Every lookup runs before anything is written; a failure leaves the file as is.

use std::fs;
use std::path::Path;

use memchr::memrchr;

use crate::error::{Error, Result};
use crate::layout::{self, Blocks};
use crate::plan::{self, PANELS};
use crate::region::{self, Region};

fn find_from(html: &str, from: usize, needle: &str) -> Option<usize> {
    html.get(from..)?.find(needle).map(|off| from + off)
}

/// Extract every panel in order, keyed by panel key.
pub fn extract_panels(html: &str) -> Result<Vec<(&'static str, String)>> {
    let mut working = html.to_string();
    let mut panels = Vec::with_capacity(PANELS.len());

    for panel in &PANELS {
        let marker = plan::heading(panel.title);
        let found = region::extract(&working, &marker, &plan::GROUP_BOX)?;
        log::debug!("extracted panel {} ({} bytes)", panel.key, found.len());

        panels.push((panel.key, found.text(&working).to_string()));
        working.replace_range(found.start..found.end, &plan::placeholder(panel.key));
    }
    Ok(panels)
}

/// The `<div class="button-group"...>` block following its anchor comment.
pub fn button_group(html: &str) -> Result<&str> {
    let comment = html
        .find(plan::BUTTON_GROUP_COMMENT)
        .ok_or_else(|| Error::missing(plan::BUTTON_GROUP_COMMENT))?;
    let start = find_from(html, comment, plan::BUTTON_GROUP_OPEN).ok_or_else(|| {
        Error::missing(format!(
            "{} after {}",
            plan::BUTTON_GROUP_OPEN,
            plan::BUTTON_GROUP_COMMENT
        ))
    })?;
    let close = find_from(html, start, plan::DIV_CLOSE).ok_or_else(|| {
        Error::missing(format!("{} after {}", plan::DIV_CLOSE, plan::BUTTON_GROUP_OPEN))
    })?;
    Ok(&html[start..close + plan::DIV_CLOSE.len()])
}

/// Content of the input panel, excluding its own opening and closing tags.
pub fn input_content(html: &str) -> Result<Region> {
    let comment = html
        .find(plan::INPUT_PANEL_COMMENT)
        .ok_or_else(|| Error::missing(plan::INPUT_PANEL_COMMENT))?;
    let open = find_from(html, comment, plan::INPUT_PANEL_OPEN).ok_or_else(|| {
        Error::missing(format!(
            "{} after {}",
            plan::INPUT_PANEL_OPEN,
            plan::INPUT_PANEL_COMMENT
        ))
    })?;
    let results = html
        .find(plan::RESULTS_COLUMN_COMMENT)
        .ok_or_else(|| Error::missing(plan::RESULTS_COLUMN_COMMENT))?;

    let end = html
        .get(open..results)
        .and_then(|between| between.rfind(plan::DIV_CLOSE))
        .map(|off| open + off)
        .ok_or_else(|| {
            Error::missing(format!(
                "{} closing {} before {}",
                plan::DIV_CLOSE,
                plan::INPUT_PANEL_OPEN,
                plan::RESULTS_COLUMN_COMMENT
            ))
        })?;

    Ok(Region::new(open + plan::INPUT_PANEL_OPEN.len(), end))
}

/// Indentation of the first panel's group-box line inside `content`.
pub fn detect_indent(html: &str, content: Region) -> Result<String> {
    let first = &PANELS[0];
    let marker = plan::heading(first.title);

    let at = find_from(html, content.start, &marker).ok_or_else(|| Error::missing(&marker))?;
    if at > content.end {
        return Err(Error::PanelOutsideInputs {
            title: first.title.to_string(),
        });
    }

    let group = html[content.start..at]
        .rfind(plan::GROUP_BOX.opening)
        .map(|off| content.start + off)
        .ok_or_else(|| Error::missing(format!("{} before {}", plan::GROUP_BOX.opening, marker)))?;

    let line_start = memrchr(b'\n', &html.as_bytes()[content.start..group])
        .map_or(0, |off| content.start + off + 1);
    let prefix = &html[line_start..group];

    if prefix.trim().is_empty() {
        Ok(prefix.to_string())
    } else {
        log::warn!(
            "indentation before the first panel is {:?}; using the default",
            prefix
        );
        Ok(plan::DEFAULT_INDENT.to_string())
    }
}

/// Rewrite the page into the two-column layout.
pub fn restructure(html: &str) -> Result<String> {
    let panels = extract_panels(html)?;
    let buttons = button_group(html)?;
    let content = input_content(html)?;
    let indent = detect_indent(html, content)?;
    log::debug!(
        "input content at {}..{}, indent {:?}",
        content.start,
        content.end,
        indent
    );

    let blocks = Blocks::new(panels, buttons.to_string());
    let section = layout::render(&plan::COLUMNS, &blocks, &indent)?;

    let mut out = String::with_capacity(html.len() + section.len());
    out.push_str(&html[..content.start]);
    out.push_str(&section);
    out.push_str(&html[content.end..]);
    Ok(out)
}

/// Read `input`, rewrite it and write the result to `output` in one shot.
pub fn run(input: &Path, output: &Path) -> Result<()> {
    let html = fs::read_to_string(input).map_err(|source| Error::Io {
        path: input.to_path_buf(),
        source,
    })?;

    let rewritten = restructure(&html)?;

    fs::write(output, rewritten).map_err(|source| Error::Io {
        path: output.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_box(indent: &str, title: &str) -> String {
        format!(
            "{indent}<div class=\"group-box\">\n\
             {indent}\t<h3>{title}</h3>\n\
             {indent}\t<div class=\"form-row\">\n\
             {indent}\t\t<input type=\"text\">\n\
             {indent}\t</div>\n\
             {indent}</div>\n"
        )
    }

    /// A page shaped like the simulator, with panels at `indent`.
    fn page(indent: &str) -> String {
        let mut html = String::from("<body>\n\t<!-- Painel de entrada -->\n\t<div class=\"panel\">\n");
        for panel in &PANELS {
            html.push_str(&group_box(indent, panel.title));
        }
        html.push_str(&format!(
            "{indent}<!-- Para estas duas linhas (adicionando um container para os botões) -->\n\
             {indent}<div class=\"button-group\">\n\
             {indent}\t<button>Simular</button>\n\
             {indent}</div>\n\
             \t</div>\n\
             \t<!-- Coluna Direita - Resultados e Gráficos -->\n\
             \t<div class=\"results\"></div>\n\
             </body>\n"
        ));
        html
    }

    #[test]
    fn panels_come_out_in_order() {
        let html = page("\t\t");
        let panels = extract_panels(&html).unwrap();
        let keys: Vec<_> = panels.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            [
                "dados_empresa",
                "dados_financeiros",
                "sistema_tributario",
                "ciclo_financeiro",
                "iva_dual",
                "parametros_simulacao"
            ]
        );
        let (_, first) = &panels[0];
        assert!(first.starts_with("<div class=\"group-box\">\n\t\t\t<h3>Dados da Empresa</h3>"));
        assert!(first.ends_with("\t\t</div>"));
    }

    #[test]
    fn duplicate_heading_resolves_to_first_panel() {
        let mut html = page("\t\t");
        html = html.replacen(
            "<h3>Dados Financeiros</h3>",
            "<h3>Dados da Empresa</h3><h3>Dados Financeiros</h3>",
            1,
        );
        let panels = extract_panels(&html).unwrap();
        assert!(panels[0].1.contains("<h3>Dados da Empresa</h3>\n"));
        assert!(panels[1].1.contains("<h3>Dados da Empresa</h3><h3>Dados Financeiros</h3>"));
    }

    #[test]
    fn button_group_is_shallow() {
        let html = page("  ");
        assert_eq!(
            button_group(&html).unwrap(),
            "<div class=\"button-group\">\n  \t<button>Simular</button>\n  </div>"
        );
    }

    #[test]
    fn missing_button_comment() {
        let html = page("\t").replace("<!-- Para estas duas linhas", "<!-- Duas linhas");
        match button_group(&html) {
            Err(Error::MarkerNotFound { marker }) => {
                assert_eq!(marker, plan::BUTTON_GROUP_COMMENT)
            }
            other => panic!("expected MarkerNotFound, got {other:?}"),
        }
    }

    #[test]
    fn input_content_range() {
        let html = page("\t\t");
        let content = input_content(&html).unwrap();
        assert!(content.text(&html).starts_with("\n\t\t<div class=\"group-box\">"));
        assert!(content.text(&html).ends_with("\t\t</div>\n\t"));
        assert!(html[content.end..].starts_with("</div>\n\t<!-- Coluna Direita"));
    }

    #[test]
    fn results_comment_before_panel() {
        let html = format!(
            "<!-- Coluna Direita - Resultados e Gráficos -->\n{}",
            page("\t").replace("\t<!-- Coluna Direita - Resultados e Gráficos -->\n", "")
        );
        assert!(matches!(
            input_content(&html),
            Err(Error::MarkerNotFound { .. })
        ));
    }

    #[test]
    fn indentation_is_detected() {
        let html = page("\t\t\t");
        let content = input_content(&html).unwrap();
        assert_eq!(detect_indent(&html, content).unwrap(), "\t\t\t");
    }

    #[test]
    fn non_blank_prefix_falls_back_to_default() {
        let html = page("\t\t").replacen(
            "\t\t<div class=\"group-box\">",
            "\t\t<span></span><div class=\"group-box\">",
            1,
        );
        let content = input_content(&html).unwrap();
        assert_eq!(detect_indent(&html, content).unwrap(), plan::DEFAULT_INDENT);
    }

    #[test]
    fn first_panel_after_input_content() {
        // Move "Dados da Empresa" out of the input panel.
        let html = page("\t\t").replacen("Dados da Empresa", "Outro Painel", 1)
            + "<div class=\"group-box\"><h3>Dados da Empresa</h3></div>\n";
        let content = input_content(&html).unwrap();
        match detect_indent(&html, content) {
            Err(Error::PanelOutsideInputs { title }) => assert_eq!(title, "Dados da Empresa"),
            other => panic!("expected PanelOutsideInputs, got {other:?}"),
        }
    }

    #[test]
    fn restructure_builds_two_columns() {
        let html = page("\t\t");
        let out = restructure(&html).unwrap();

        assert!(out.starts_with(
            "<body>\n\t<!-- Painel de entrada -->\n\t<div class=\"panel\">\n\
             \t\t<div class=\"two-column-container\">\n\
             \t\t<!-- Coluna Esquerda -->\n\
             \t\t<div class=\"column-left\">\n\
             \t\t    <div class=\"group-box\">\n\
             \t\t    \t\t\t<h3>Dados da Empresa</h3>\n"
        ));
        assert!(out.ends_with(
            "\t\t    \t\t</div>\n\
             \t\t</div>\n\
             \t\t</div>\n\
             </div>\n\
             \t<!-- Coluna Direita - Resultados e Gráficos -->\n\
             \t<div class=\"results\"></div>\n\
             </body>\n"
        ));

        let pos = |needle: &str| out.find(needle).unwrap();
        let left = pos("<div class=\"column-left\">");
        let right = pos("<div class=\"column-right\">");
        assert!(left < pos("<h3>Dados da Empresa</h3>"));
        assert!(pos("<h3>Sistema Tributário Atual</h3>") < right);
        assert!(right < pos("<h3>Ciclo Financeiro</h3>"));
        assert!(pos("<h3>Parâmetros da Simulação</h3>") < pos("<div class=\"button-group\">"));

        assert!(!out.contains("EXTRACTED PANEL"));
        assert!(!out.contains(plan::BUTTON_GROUP_COMMENT));
        let (opens, closes) = crate::tag::count(out.as_bytes(), b"div");
        assert_eq!(opens, closes);
    }

    #[test]
    fn rerun_on_output_fails() {
        let once = restructure(&page("\t\t")).unwrap();
        match restructure(&once) {
            Err(Error::MarkerNotFound { marker }) => {
                assert_eq!(marker, plan::BUTTON_GROUP_COMMENT)
            }
            other => panic!("expected MarkerNotFound, got {other:?}"),
        }
    }

    #[test]
    fn missing_panel_aborts() {
        let html = page("\t").replace("<h3>Ciclo Financeiro</h3>", "<h3>Ciclo</h3>");
        match restructure(&html) {
            Err(Error::MarkerNotFound { marker }) => {
                assert_eq!(marker, "<h3>Ciclo Financeiro</h3>")
            }
            other => panic!("expected MarkerNotFound, got {other:?}"),
        }
    }

    #[test]
    fn run_writes_output_and_keeps_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("page.html");
        let output = dir.path().join("out.html");
        let html = page("\t\t");
        fs::write(&input, &html).unwrap();

        run(&input, &output).unwrap();

        assert_eq!(fs::read_to_string(&input).unwrap(), html);
        assert!(fs::read_to_string(&output)
            .unwrap()
            .contains("<div class=\"two-column-container\">"));
    }

    #[test]
    fn run_leaves_file_untouched_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("page.html");
        let html = page("\t").replace("<!-- Painel de entrada -->", "");
        fs::write(&input, &html).unwrap();

        assert!(run(&input, &input).is_err());
        assert_eq!(fs::read_to_string(&input).unwrap(), html);
    }

    #[test]
    fn run_reports_unreadable_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.html");
        match run(&input, &input) {
            Err(Error::Io { path, .. }) => assert_eq!(path, input),
            other => panic!("expected Io, got {other:?}"),
        }
    }
}
