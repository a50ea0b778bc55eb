//! Create a purchase and read it back.
//!
//! Run with:
//! ```
//! QUICKBOOKS_ACCESS_TOKEN=... QUICKBOOKS_REALM_ID=... \
//! QUICKBOOKS_ENDPOINT=https://sandbox-quickbooks.api.intuit.com \
//!     cargo run --example create_purchase
//! ```

use quickbooks::{
    Create, Get, Line, PaymentType, Purchase, QuickBooksClient, QuickBooksError, ReferenceType,
};

#[tokio::main]
async fn main() -> quickbooks::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    let client = QuickBooksClient::from_env()?;
    println!("Using realm {} at {}", client.realm_id(), client.endpoint());

    let purchase = Purchase::new(PaymentType::Cash, ReferenceType::named("35", "Checking"))
        .with_line(
            Line::account_expense(42.0, ReferenceType::named("13", "Meals and Entertainment"))
                .with_description("Team lunch"),
        );

    println!("\n--- Creating Purchase ---");
    let created = match Purchase::create(&client, &purchase).await {
        Ok(p) => p,
        Err(QuickBooksError::Fault { status, fault }) => {
            eprintln!("Rejected with HTTP {status}: {fault}");
            for error in &fault.errors {
                eprintln!("  - {:?}: {:?}", error.element, error.detail);
            }
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let id = created.id.clone().unwrap_or_default();
    println!("Created purchase {id}");
    println!("  Total: {:?}", created.total_amt);
    println!("  Date: {:?}", created.txn_date);

    println!("\n--- Reading It Back ---");
    let fetched = Purchase::get(&client, id).await?;
    println!("SyncToken: {:?}", fetched.sync_token);
    println!("Lines: {}", fetched.line.len());

    println!("\nDone!");
    Ok(())
}
