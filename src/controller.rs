//! # Application Controller
//!
//! Owns the gateway client, one view model per flow and the renderer.
//! Runs either a single flow (one-shot subcommands) or an interactive shell
//! that keeps every flow's state between commands.

use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::cmd_args::FlowCommand;
use crate::gateway::GatewayClient;
use crate::models::{PaymentForm, PaymentMethod};
use crate::view_models::{InvoiceFlow, PaymentFlow, VerifyFlow};
use crate::views::{TerminalRenderer, ViewRenderer};

const SHELL_HELP: &str = "\
Commandes :
  invoice <référence>                          Consulter une facture
  pay <référence> <montant> <transaction> <téléphone>
                                               Effectuer un paiement
  mode post|get                                Méthode de paiement
  verify <transaction>                         Vérifier un paiement
  reset invoice|verify                         Nouvelle recherche / vérification
  raw payment|verify                           Afficher/masquer les données brutes
  help                                         Cette aide
  quit                                         Quitter";

/// Which flow a shell command targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Invoice,
    Payment,
    Verify,
}

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Invoice(String),
    Pay(PaymentForm),
    Mode(PaymentMethod),
    Verify(String),
    Reset(Flow),
    ToggleRaw(Flow),
    Help,
    Quit,
    Empty,
}

impl ShellCommand {
    /// Parse one shell line. Errors are messages for the user.
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((command, args)) = words.split_first() else {
            return Ok(ShellCommand::Empty);
        };

        match (command.to_lowercase().as_str(), args) {
            ("invoice" | "facture", [reference]) => Ok(ShellCommand::Invoice(reference.to_string())),
            ("invoice" | "facture", _) => Err("Usage : invoice <référence>".to_string()),
            ("pay" | "payer", [reference, amount, transaction_id, phone_number]) => {
                Ok(ShellCommand::Pay(PaymentForm::new(
                    *reference,
                    *amount,
                    *transaction_id,
                    *phone_number,
                )))
            }
            ("pay" | "payer", _) => Err(
                "Usage : pay <référence> <montant> <transaction> <téléphone>".to_string(),
            ),
            ("mode", [method]) => match method.to_lowercase().as_str() {
                "post" => Ok(ShellCommand::Mode(PaymentMethod::Post)),
                "get" => Ok(ShellCommand::Mode(PaymentMethod::Get)),
                _ => Err(format!("Méthode inconnue : {method} (post ou get)")),
            },
            ("mode", _) => Err("Usage : mode post|get".to_string()),
            ("verify" | "verifier", [transaction_id]) => {
                Ok(ShellCommand::Verify(transaction_id.to_string()))
            }
            ("verify" | "verifier", _) => Err("Usage : verify <transaction>".to_string()),
            ("reset", [flow]) => match Self::parse_flow(flow)? {
                Flow::Payment => {
                    Err("Le paiement ne peut pas être réinitialisé".to_string())
                }
                flow => Ok(ShellCommand::Reset(flow)),
            },
            ("reset", _) => Err("Usage : reset invoice|verify".to_string()),
            ("raw", [flow]) => match Self::parse_flow(flow)? {
                Flow::Invoice => Err(
                    "La consultation de facture n'a pas de données brutes".to_string(),
                ),
                flow => Ok(ShellCommand::ToggleRaw(flow)),
            },
            ("raw", _) => Err("Usage : raw payment|verify".to_string()),
            ("help" | "?", _) => Ok(ShellCommand::Help),
            ("quit" | "exit", _) => Ok(ShellCommand::Quit),
            (other, _) => Err(format!("Commande inconnue : {other} (tapez 'help')")),
        }
    }

    fn parse_flow(word: &str) -> std::result::Result<Flow, String> {
        match word.to_lowercase().as_str() {
            "invoice" | "facture" => Ok(Flow::Invoice),
            "payment" | "pay" | "paiement" => Ok(Flow::Payment),
            "verify" | "verification" => Ok(Flow::Verify),
            other => Err(format!("Flux inconnu : {other}")),
        }
    }
}

/// The main application controller
pub struct AppController<W: Write> {
    client: GatewayClient,
    invoice: InvoiceFlow,
    payment: PaymentFlow,
    verify: VerifyFlow,
    renderer: TerminalRenderer<W>,
}

impl<W: Write> AppController<W> {
    pub fn new(client: GatewayClient, renderer: TerminalRenderer<W>) -> Self {
        Self {
            client,
            invoice: InvoiceFlow::new(),
            payment: PaymentFlow::new(),
            verify: VerifyFlow::new(),
            renderer,
        }
    }

    /// Show raw payloads from the first render on
    pub fn set_show_raw(&mut self, show: bool) {
        self.payment.set_show_raw(show);
        self.verify.set_show_raw(show);
    }

    pub fn invoice(&self) -> &InvoiceFlow {
        &self.invoice
    }

    pub fn payment(&self) -> &PaymentFlow {
        &self.payment
    }

    pub fn verify(&self) -> &VerifyFlow {
        &self.verify
    }

    pub fn into_renderer(self) -> TerminalRenderer<W> {
        self.renderer
    }

    /// Run one flow. Returns `true` when it ended in `Success`.
    pub async fn run_once(&mut self, command: FlowCommand) -> Result<bool> {
        match command {
            FlowCommand::Invoice { reference } => self.lookup_invoice(reference).await,
            FlowCommand::Pay {
                reference,
                amount,
                transaction_id,
                phone_number,
                method,
            } => {
                self.payment.set_method(method);
                self.pay(PaymentForm::new(reference, amount, transaction_id, phone_number))
                    .await
            }
            FlowCommand::Verify { transaction_id } => self.verify_payment(transaction_id).await,
            FlowCommand::Shell => {
                let stdin = tokio::io::BufReader::new(tokio::io::stdin());
                self.run_shell(stdin).await?;
                Ok(true)
            }
        }
    }

    /// Read commands line by line until `quit` or end of input
    pub async fn run_shell<R>(&mut self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        tracing::info!("Interactive shell started");
        self.renderer
            .render_message("payline - tapez 'help' pour la liste des commandes")?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            tracing::debug!("Shell input: {:?}", line);
            match ShellCommand::parse(&line) {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => self.dispatch(command).await?,
                Err(message) => self.renderer.render_message(&message)?,
            }
        }

        tracing::info!("Interactive shell finished");
        Ok(())
    }

    async fn dispatch(&mut self, command: ShellCommand) -> Result<()> {
        match command {
            ShellCommand::Invoice(reference) => {
                self.lookup_invoice(reference).await?;
            }
            ShellCommand::Pay(form) => {
                self.pay(form).await?;
            }
            ShellCommand::Mode(method) => {
                self.payment.set_method(method);
                self.renderer
                    .render_message(&format!("Méthode de paiement : {}", method.label()))?;
            }
            ShellCommand::Verify(transaction_id) => {
                self.verify_payment(transaction_id).await?;
            }
            ShellCommand::Reset(Flow::Invoice) => {
                self.invoice.reset();
                self.renderer.render_invoice(&self.invoice)?;
            }
            ShellCommand::Reset(Flow::Verify) => {
                self.verify.reset();
                self.renderer.render_verification(&self.verify)?;
            }
            ShellCommand::ToggleRaw(Flow::Payment) => {
                self.payment.toggle_raw();
                self.renderer.render_payment(&self.payment)?;
            }
            ShellCommand::ToggleRaw(Flow::Verify) => {
                self.verify.toggle_raw();
                self.renderer.render_verification(&self.verify)?;
            }
            ShellCommand::Help => self.renderer.render_message(SHELL_HELP)?,
            // rejected by the parser
            ShellCommand::Reset(Flow::Payment)
            | ShellCommand::ToggleRaw(Flow::Invoice)
            | ShellCommand::Quit
            | ShellCommand::Empty => {}
        }
        Ok(())
    }

    async fn lookup_invoice(&mut self, reference: String) -> Result<bool> {
        self.invoice.set_reference(reference);
        let Some(reference) = self.invoice.begin() else {
            self.renderer.render_invoice(&self.invoice)?;
            return Ok(false);
        };
        self.renderer.render_invoice(&self.invoice)?;

        let exchange = self.client.consult_invoice(&reference).await;
        self.invoice.finish(&reference, exchange);
        self.renderer.render_invoice(&self.invoice)?;
        Ok(self.invoice.state().result().is_some())
    }

    async fn pay(&mut self, form: PaymentForm) -> Result<bool> {
        self.payment.set_form(form);
        let Some(request) = self.payment.begin() else {
            self.renderer.render_payment(&self.payment)?;
            return Ok(false);
        };
        self.renderer.render_payment(&self.payment)?;

        let method = self.payment.method();
        let exchange = self.client.submit_payment(&request, method).await;
        self.payment.finish(&request, method, exchange);
        self.renderer.render_payment(&self.payment)?;
        Ok(self.payment.state().result().is_some())
    }

    async fn verify_payment(&mut self, transaction_id: String) -> Result<bool> {
        self.verify.set_transaction_id(transaction_id);
        let Some(transaction_id) = self.verify.begin() else {
            self.renderer.render_verification(&self.verify)?;
            return Ok(false);
        };
        self.renderer.render_verification(&self.verify)?;

        let exchange = self.client.verify_payment(&transaction_id).await;
        self.verify.finish(&transaction_id, exchange);
        self.renderer.render_verification(&self.verify)?;
        Ok(self.verify.state().result().is_some())
    }
}
