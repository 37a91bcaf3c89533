use std::fmt::Display;

/// Input rejected before any request is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingReference,
    MissingTransactionId,
    /// One of the four payment fields is empty
    MissingPaymentFields,
    InvalidAmount,
    InvalidPhoneNumber,
}

impl std::error::Error for ValidationError {}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            ValidationError::MissingReference => "Veuillez saisir une référence de paiement",
            ValidationError::MissingTransactionId => "Veuillez saisir un identifiant de transaction",
            ValidationError::MissingPaymentFields => "Tous les champs sont obligatoires",
            ValidationError::InvalidAmount => "Veuillez saisir un montant valide",
            ValidationError::InvalidPhoneNumber => {
                "Le numéro mobile doit contenir 8 chiffres (ex: 12345678)"
            }
        };
        f.write_str(message)
    }
}

/// Trimmed field, or `None` when blank
pub(crate) fn required(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}
