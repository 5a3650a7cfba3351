//! Plain-text views over the store state and API payloads.

use std::io::{self, Write};

use crate::api::{ApiError, HistoricoDespesas, Operadora};
use crate::core::State;

const DASH: &str = "-";

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(DASH)
}

/// Listing view: loading line, error with retry hint, empty notice, or the
/// table plus pager.
pub fn render_listing<W: Write>(out: &mut W, state: &State) -> io::Result<()> {
    if state.loading {
        return writeln!(out, "Carregando operadoras...");
    }

    if let Some(message) = state.error_message() {
        writeln!(out, "Erro: {message}")?;
        return writeln!(out, "Use 'browse' e pressione 'r' para tentar novamente.");
    }

    if !state.search_query.is_empty() {
        writeln!(out, "Busca: \"{}\"", state.search_query)?;
    }

    if state.operadoras.is_empty() {
        return writeln!(out, "Nenhuma operadora encontrada.");
    }

    writeln!(
        out,
        "{:<16} {:<8} {:<4} {:<28} {}",
        "CNPJ", "ANS", "UF", "MODALIDADE", "RAZÃO SOCIAL"
    )?;
    for op in &state.operadoras {
        writeln!(
            out,
            "{:<16} {:<8} {:<4} {:<28} {}",
            or_dash(op.cnpj.as_deref()),
            or_dash(op.registro_ans.as_deref()),
            or_dash(op.uf.as_deref()),
            or_dash(op.modalidade.as_deref()),
            or_dash(op.razao_social.as_deref()),
        )?;
    }

    writeln!(
        out,
        "Página {} de {} ({} operadoras)",
        state.current_page, state.total_pages, state.total
    )
}

/// Detail view for one operator and its quarterly expenses.
pub fn render_operadora<W: Write>(
    out: &mut W,
    operadora: &Operadora,
    despesas: &Result<HistoricoDespesas, ApiError>,
) -> io::Result<()> {
    writeln!(out, "{}", or_dash(operadora.razao_social.as_deref()))?;
    writeln!(out, "  CNPJ:          {}", or_dash(operadora.cnpj.as_deref()))?;
    writeln!(out, "  Registro ANS:  {}", or_dash(operadora.registro_ans.as_deref()))?;
    writeln!(out, "  Modalidade:    {}", or_dash(operadora.modalidade.as_deref()))?;
    writeln!(out, "  UF:            {}", or_dash(operadora.uf.as_deref()))?;
    writeln!(out, "  Cadastro:      {}", or_dash(operadora.data_cadastro.as_deref()))?;
    for (name, value) in &operadora.extra {
        writeln!(out, "  {name}: {value}")?;
    }

    writeln!(out)?;
    match despesas {
        Ok(historico) if historico.despesas.is_empty() => {
            writeln!(out, "Nenhuma despesa registrada.")
        }
        Ok(historico) => {
            writeln!(out, "Despesas ({} trimestres):", historico.num_trimestres)?;
            for d in &historico.despesas {
                writeln!(out, "  {}T{}  {:>18.2}", d.trimestre, d.ano, d.valor_despesas)?;
            }
            writeln!(out, "  Total  {:>18.2}", historico.total_despesas)
        }
        Err(err) => writeln!(out, "Despesas indisponíveis: {err}"),
    }
}

/// Statistics view. Failures are not shown to the user; an absent record
/// just reads as unavailable.
pub fn render_estatisticas<W: Write>(out: &mut W, state: &State) -> io::Result<()> {
    if state.estatisticas_loading {
        return writeln!(out, "Carregando estatísticas...");
    }
    let Some(stats) = &state.estatisticas else {
        return writeln!(out, "Estatísticas indisponíveis.");
    };

    writeln!(out, "Total de despesas:    {:.2}", stats.total_despesas)?;
    writeln!(out, "Média de despesas:    {:.2}", stats.media_despesas)?;
    writeln!(out, "Operadoras:           {}", stats.total_operadoras)?;
    writeln!(out, "Registros:            {}", stats.total_registros)?;

    if !stats.top_5_operadoras.is_empty() {
        writeln!(out, "\nTop operadoras por despesa:")?;
        for (i, op) in stats.top_5_operadoras.iter().enumerate() {
            writeln!(
                out,
                "  {}. {} ({}) {:.2}",
                i + 1,
                or_dash(op.razao_social.as_deref()),
                or_dash(op.uf.as_deref()),
                op.total_despesas
            )?;
        }
    }

    if !stats.despesas_por_uf.is_empty() {
        writeln!(out, "\nDespesas por UF:")?;
        for uf in &stats.despesas_por_uf {
            writeln!(
                out,
                "  {:<3} {:>18.2} {:>6.2}% ({} operadoras)",
                or_dash(uf.uf.as_deref()),
                uf.total_despesas,
                uf.percentual,
                uf.num_operadoras
            )?;
        }
    }
    Ok(())
}
