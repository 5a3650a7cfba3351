use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Paragraph, Row, Table};

use crate::api::Operadora;
use crate::core::State;
use crate::tui::{InputMode, TuiState};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

pub fn draw_ui(frame: &mut Frame, state: &State, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(3), Length(1)]);
    let [title_area, main_area, search_area, help_area] = layout.areas(frame.area());

    frame.render_widget(Span::raw(title_text(state, spinner_frame)), title_area);

    // Main area - loading, error, empty notice, or the table
    if state.loading {
        draw_notice(frame, main_area, "Operadoras", "Carregando operadoras...");
    } else if let Some(message) = state.error_message() {
        draw_error_view(frame, main_area, &message);
    } else if state.operadoras.is_empty() {
        draw_notice(frame, main_area, "Operadoras", "Nenhuma operadora encontrada.");
    } else {
        draw_table(frame, main_area, state, tui);
    }

    draw_search_box(frame, search_area, state, tui);

    let help = match tui.input_mode {
        InputMode::Browse => "←/→ página  ↑/↓ seleção  / busca  r tentar novamente  q sair",
        InputMode::Search => "Enter buscar  Esc cancelar",
    };
    frame.render_widget(
        Span::styled(help, Style::default().add_modifier(Modifier::DIM)),
        help_area,
    );
}

fn title_text(state: &State, spinner_frame: usize) -> String {
    let mut title = format!(
        "Operadoras | Página {} de {} ({} operadoras)",
        state.current_page, state.total_pages, state.total
    );
    if let Some(stats) = &state.estatisticas {
        title.push_str(&format!(
            " | Total de despesas: {:.2}",
            stats.total_despesas
        ));
    }
    if state.loading || state.estatisticas_loading {
        title.push_str(&format!(" {}", SPINNER[spinner_frame % SPINNER.len()]));
    }
    title
}

fn draw_notice(frame: &mut Frame, area: Rect, title: &str, text: &str) {
    let paragraph = Paragraph::new(text)
        .block(Block::bordered().title(title.to_string()))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_error_view(frame: &mut Frame, area: Rect, message: &str) {
    let text = format!("{message}\n\nPressione 'r' para tentar novamente.");
    let paragraph = Paragraph::new(text)
        .block(
            Block::bordered()
                .title("ERRO")
                .border_style(Style::default().fg(Color::Red)),
        )
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn operadora_row(op: &Operadora) -> Row<'_> {
    Row::new([
        or_dash(op.cnpj.as_deref()),
        or_dash(op.registro_ans.as_deref()),
        or_dash(op.uf.as_deref()),
        or_dash(op.modalidade.as_deref()),
        or_dash(op.razao_social.as_deref()),
    ])
}

fn draw_table(frame: &mut Frame, area: Rect, state: &State, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let header = Row::new(["CNPJ", "ANS", "UF", "MODALIDADE", "RAZÃO SOCIAL"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let table = Table::new(
        state.operadoras.iter().map(operadora_row),
        [Length(16), Length(8), Length(4), Length(28), Min(10)],
    )
    .header(header)
    .block(Block::bordered().title("Operadoras"))
    .row_highlight_style(Style::default().bg(Color::DarkGray));

    frame.render_stateful_widget(table, area, &mut tui.table);
}

fn draw_search_box(frame: &mut Frame, area: Rect, state: &State, tui: &TuiState) {
    let (text, style) = match tui.input_mode {
        InputMode::Search => (tui.search_input.as_str(), Style::default()),
        InputMode::Browse => (
            state.search_query.as_str(),
            Style::default().add_modifier(Modifier::DIM),
        ),
    };
    let search = Paragraph::new(text)
        .style(style)
        .block(Block::bordered().title("Busca"));
    frame.render_widget(search, area);
}
