// src/plan.rs
//
// Fixed anchors and layout for split-payment-simulator.html. Nothing here is
// configurable: the page is rewritten once and these literals describe it.

use crate::region::Container;

pub const DEFAULT_PATH: &str = "split-payment-simulator.html";

/// A panel: an `<h3>` heading inside a group-box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Panel {
    pub key: &'static str,
    pub title: &'static str,
}

/// Extraction order, top to bottom of the page.
pub const PANELS: [Panel; 6] = [
    Panel {
        key: "dados_empresa",
        title: "Dados da Empresa",
    },
    Panel {
        key: "dados_financeiros",
        title: "Dados Financeiros",
    },
    // Already carries the "Regime Tributário" field.
    Panel {
        key: "sistema_tributario",
        title: "Sistema Tributário Atual",
    },
    Panel {
        key: "ciclo_financeiro",
        title: "Ciclo Financeiro",
    },
    Panel {
        key: "iva_dual",
        title: "Sistema IVA Dual e Split Payment",
    },
    Panel {
        key: "parametros_simulacao",
        title: "Parâmetros da Simulação",
    },
];

pub const GROUP_BOX: Container = Container {
    tag: "div",
    opening: r#"<div class="group-box">"#,
};

pub const BUTTON_GROUP_COMMENT: &str =
    "<!-- Para estas duas linhas (adicionando um container para os botões) -->";
pub const BUTTON_GROUP_OPEN: &str = r#"<div class="button-group""#;

pub const INPUT_PANEL_COMMENT: &str = "<!-- Painel de entrada -->";
pub const INPUT_PANEL_OPEN: &str = r#"<div class="panel">"#;
pub const RESULTS_COLUMN_COMMENT: &str = "<!-- Coluna Direita - Resultados e Gráficos -->";

pub const DIV_CLOSE: &str = "</div>";

/// Used when the first panel's line prefix is not pure whitespace.
pub const DEFAULT_INDENT: &str = "\t\t\t\t\t\t";
/// Extra indentation for blocks nested inside a column.
pub const BLOCK_INDENT: &str = "    ";

pub const CONTAINER_CLASS: &str = "two-column-container";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Block {
    Panel(&'static str),
    ButtonGroup,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    pub comment: &'static str,
    pub class: &'static str,
    pub blocks: &'static [Block],
}

pub const COLUMNS: [Column; 2] = [
    Column {
        comment: "Coluna Esquerda",
        class: "column-left",
        blocks: &[
            Block::Panel("dados_empresa"),
            Block::Panel("dados_financeiros"),
            Block::Panel("sistema_tributario"),
        ],
    },
    Column {
        comment: "Coluna Direita",
        class: "column-right",
        blocks: &[
            Block::Panel("ciclo_financeiro"),
            // Still contains the compensation fields.
            Block::Panel("iva_dual"),
            Block::Panel("parametros_simulacao"),
            Block::ButtonGroup,
        ],
    },
];

/// The literal `<h3>` heading that anchors a panel.
pub fn heading(title: &str) -> String {
    format!("<h3>{title}</h3>")
}

/// Stands in for a panel already lifted out of the working copy.
pub fn placeholder(key: &str) -> String {
    format!("<!-- EXTRACTED PANEL {key} -->")
}
