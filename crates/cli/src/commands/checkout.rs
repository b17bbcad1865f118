//! Checkout command.

use clap::Args;
use game_store_core::CheckoutForm;
use game_store_storefront::checkout::CheckoutError;
use game_store_storefront::state::AppState;

use super::{CliError, print_json};

/// Checkout form fields.
#[derive(Args)]
pub struct CheckoutArgs {
    #[arg(short, long)]
    pub email: String,

    /// Name on the order
    #[arg(short, long)]
    pub name: String,

    /// Shipping address
    #[arg(short, long)]
    pub address: String,

    /// 16-digit card number (spaces allowed)
    #[arg(long)]
    pub card: String,

    /// Expiry date, MM/YY
    #[arg(long)]
    pub expiry: String,

    #[arg(long)]
    pub cvc: String,
}

impl From<CheckoutArgs> for CheckoutForm {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            email: args.email,
            name: args.name,
            address: args.address,
            card_number: args.card,
            expiry_date: args.expiry,
            cvc: args.cvc,
        }
    }
}

/// Place an order for the current cart.
///
/// Field errors are printed as a JSON object before failing.
pub async fn run(state: &AppState, args: CheckoutArgs) -> Result<(), CliError> {
    let form = CheckoutForm::from(args);
    match state.checkout().place_order(&form).await {
        Ok(confirmation) => print_json(&confirmation),
        Err(CheckoutError::Validation(errors)) => {
            print_json(&serde_json::json!({ "errors": &errors }))?;
            Err(CheckoutError::Validation(errors).into())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_map_to_form_fields() {
        let form = CheckoutForm::from(CheckoutArgs {
            email: "a@b.co".to_owned(),
            name: "Al".to_owned(),
            address: "1 Main".to_owned(),
            card: "4242 4242 4242 4242".to_owned(),
            expiry: "01/30".to_owned(),
            cvc: "999".to_owned(),
        });
        assert_eq!(form.card_number, "4242 4242 4242 4242");
        assert_eq!(form.expiry_date, "01/30");
    }
}
