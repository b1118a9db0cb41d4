//! Transaction commands: broadcast to storage, submit to public

use eth_storage_relay::{Credential, Relay};

use super::parse_payload;

pub async fn handle_broadcast(relay: &Relay, data: &str, quiet: bool) -> anyhow::Result<()> {
    let payload = parse_payload(data)?;

    if !quiet {
        eprintln!(
            "Broadcasting {} bytes to {} storage endpoints...",
            payload.len(),
            relay.registry().len()
        );
    }

    let outcome = relay.broadcast(&payload).await;

    for result in outcome.results() {
        match &result.result {
            Ok(hash) => println!("{}  {}", hash, result.url),
            Err(e) => eprintln!("FAILED  {}: {}", result.url, e),
        }
    }

    outcome.into_result()?;
    Ok(())
}

pub async fn handle_submit(
    relay: &Relay,
    data: &str,
    key_env: Option<&str>,
    quiet: bool,
) -> anyhow::Result<()> {
    let payload = parse_payload(data)?;
    let public = relay.get_public();

    let credential = match key_env {
        Some(var) => Credential::from_env(var)?,
        None => public.credential().cloned().ok_or_else(|| {
            anyhow::anyhow!("No key configured for the public endpoint. Use --key-env")
        })?,
    };

    if !quiet {
        eprintln!("Submitting {} bytes to {}...", payload.len(), public.url());
    }

    if !relay.submit_to_public(&public, &credential, &payload).await {
        return Err(anyhow::anyhow!("Submission to {} failed", public.url()));
    }

    println!("Submitted to {}", public.url());
    Ok(())
}
