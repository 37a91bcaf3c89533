//! # Terminal Renderer
//!
//! Renders a flow's view model as text. Colors are optional so the same
//! output can be written to a pipe or captured in tests.

use anyhow::Result;
use crossterm::style::{style, Color, Stylize};
use serde_json::Value;
use std::io::Write;

use crate::models::PaymentResult;
use crate::view_models::{
    FlowState, InvoiceFlow, PaymentFlow, VerifyFlow, NOT_YET_PAID, PAYMENT_SUCCEEDED,
};

const INVOICE_CURRENCY: &str = "MAD";
const PAYMENT_CURRENCY: &str = "MRO";

/// Trait for rendering flows
pub trait ViewRenderer {
    fn render_invoice(&mut self, flow: &InvoiceFlow) -> Result<()>;
    fn render_payment(&mut self, flow: &PaymentFlow) -> Result<()>;
    fn render_verification(&mut self, flow: &VerifyFlow) -> Result<()>;
    /// Print a one-off line (help text, shell errors)
    fn render_message(&mut self, message: &str) -> Result<()>;
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    colored: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, colored: bool) -> Self {
        Self { out, colored }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.colored {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.colored {
            style(text).bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn title(&mut self, text: &str) -> Result<()> {
        let title = self.bold(text);
        writeln!(self.out, "{title}")?;
        Ok(())
    }

    fn field(&mut self, label: &str, value: &str) -> Result<()> {
        let value = self.bold(value);
        writeln!(self.out, "  {label} : {value}")?;
        Ok(())
    }

    /// Loading and error lines shared by every flow
    fn status<T>(&mut self, state: &FlowState<T>, loading: &str) -> Result<()> {
        match state {
            FlowState::Submitting => writeln!(self.out, "{loading}")?,
            FlowState::Failed(failure) => {
                let message = self.paint(&failure.message, Color::Red);
                writeln!(self.out, "Erreur : {message}")?;
            }
            FlowState::Idle | FlowState::Success(_) => {}
        }
        Ok(())
    }

    fn raw_panel(&mut self, title: &str, raw: Option<&Value>) -> Result<()> {
        let header = self.paint(title, Color::DarkGrey);
        writeln!(self.out, "{header}")?;
        let text = match raw {
            Some(value) => serde_json::to_string_pretty(value)?,
            None => "null".to_string(),
        };
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    fn payment_result(&mut self, result: &PaymentResult) -> Result<()> {
        let success = self.paint(PAYMENT_SUCCEEDED, Color::Green);
        writeln!(self.out, "{success}")?;
        self.field("Référence", &result.reference)?;
        if let Some(api_id) = &result.api_id {
            self.field("Identifiant API", api_id)?;
        }
        self.field(
            "Montant payé",
            &format!("{} {PAYMENT_CURRENCY}", result.amount_paid_display()),
        )?;

        let progress = result.progress();
        let color = if result.remaining_amount == 0.0 {
            Color::Green
        } else {
            Color::Yellow
        };
        let label = self.paint(progress.label(), color);
        writeln!(self.out, "  Statut : {label}")?;

        if result.remaining_amount != 0.0 {
            self.field(
                "Montant restant",
                &format!("{} {PAYMENT_CURRENCY}", result.remaining_display()),
            )?;
        }
        Ok(())
    }
}

impl<W: Write> ViewRenderer for TerminalRenderer<W> {
    fn render_invoice(&mut self, flow: &InvoiceFlow) -> Result<()> {
        self.title("Consulter les informations de facture")?;
        self.status(flow.state(), "Recherche en cours...")?;

        match flow.state() {
            FlowState::Idle => writeln!(self.out, "Entrez votre référence de paiement")?,
            FlowState::Success(invoice) => {
                self.field("Nom", &invoice.company_name)?;
                if let Some(phone) = &invoice.company_phone {
                    self.field("Téléphone", phone)?;
                }
                self.field("Référence", &invoice.reference)?;
                self.field("Réf. Facture", &invoice.invoice_ref)?;
                if let Some(date) = &invoice.date {
                    self.field("Date", date)?;
                }
                self.field("Montant", &format!("{} {INVOICE_CURRENCY}", invoice.amount))?;
                self.field("Statut", &invoice.status)?;

                let color = if invoice.paid { Color::Green } else { Color::Yellow };
                let paid = self.paint(invoice.payment_status_label(), color);
                writeln!(self.out, "  Statut de paiement : {paid}")?;

                if !invoice.lines.is_empty() {
                    self.title("Lignes de facture")?;
                    for line in &invoice.lines {
                        let description = line
                            .description
                            .as_deref()
                            .map(|d| format!("{d} - "))
                            .unwrap_or_default();
                        writeln!(
                            self.out,
                            "  - {description}{} x {}",
                            line.quantity, line.unit_price
                        )?;
                        writeln!(
                            self.out,
                            "    Total : {} (TVA : {}%)",
                            line.total, line.vat_rate
                        )?;
                    }
                }
            }
            FlowState::Submitting | FlowState::Failed(_) => {}
        }

        self.out.flush()?;
        Ok(())
    }

    fn render_payment(&mut self, flow: &PaymentFlow) -> Result<()> {
        let method = flow.method();
        self.title(&format!("Paiement (méthode : {})", method.label()))?;
        self.status(flow.state(), "Traitement en cours...")?;

        match flow.state() {
            FlowState::Idle => writeln!(
                self.out,
                "Saisissez la référence OTP, le montant, l'identifiant de transaction et le numéro mobile"
            )?,
            FlowState::Success(result) => self.payment_result(result)?,
            FlowState::Submitting | FlowState::Failed(_) => {}
        }

        if flow.show_raw() {
            if let Some((raw_method, raw)) = flow.raw() {
                self.raw_panel(&format!("Données techniques - API {raw_method}"), Some(raw))?;
            }
        }

        self.out.flush()?;
        Ok(())
    }

    fn render_verification(&mut self, flow: &VerifyFlow) -> Result<()> {
        self.title("Vérifier le statut de paiement")?;
        self.status(flow.state(), "Vérification en cours...")?;

        match flow.state() {
            FlowState::Idle => writeln!(self.out, "Entrez l'ID de transaction")?,
            FlowState::Success(result) => {
                let color = if result.is_paid() {
                    Color::Green
                } else {
                    Color::Yellow
                };
                let status = self.paint(&result.status.to_uppercase(), color);
                writeln!(self.out, "Statut de paiement: {status}")?;

                if result.is_paid() {
                    self.field("ID de transaction", &result.transaction_id)?;
                    if let Some(api_id) = &result.api_id {
                        self.field("ID API", api_id)?;
                    }
                    if let Some(date) = &result.payment_date {
                        self.field("Date de paiement", date)?;
                    }
                } else {
                    writeln!(self.out, "{NOT_YET_PAID}")?;
                }
            }
            FlowState::Submitting | FlowState::Failed(_) => {}
        }

        if flow.show_raw() {
            self.raw_panel("Données brutes", flow.raw())?;
        }

        self.out.flush()?;
        Ok(())
    }

    fn render_message(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{message}")?;
        self.out.flush()?;
        Ok(())
    }
}
