//! Run with: cargo run --package server --bin generate-types --features typescript

use std::fs;
use std::path::Path;

fn main() {
    println!("Generating TypeScript types...");

    let out_dir = Path::new("web/types/generated");

    if let Err(e) = fs::create_dir_all(out_dir) {
        eprintln!("Failed to create output directory: {}", e);
        std::process::exit(1);
    }

    #[cfg(feature = "typescript")]
    {
        use ts_rs::TS;

        dialer_core::CallStatus::export_all_to(out_dir).expect("Failed to export CallStatus");
        dialer_core::CallResult::export_all_to(out_dir).expect("Failed to export CallResult");
        dialer_core::BulkDispatchOutcome::export_all_to(out_dir)
            .expect("Failed to export BulkDispatchOutcome");

        server::routes::MakeCallsRequest::export_all_to(out_dir)
            .expect("Failed to export MakeCallsRequest");
        server::routes::MakeCallsResponse::export_all_to(out_dir)
            .expect("Failed to export MakeCallsResponse");
        server::routes::AssistantsResponse::export_all_to(out_dir)
            .expect("Failed to export AssistantsResponse");
    }

    println!("Types written to {}", out_dir.display());
}
