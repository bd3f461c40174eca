pub mod admin;
pub mod agent;
pub mod cli;
pub mod knowledge;
pub mod llm;
pub mod models;
pub mod server;
pub mod session;

use agent::CivicAgent;
use cli::Args;
use knowledge::KnowledgeBase;
use log::info;
use server::Server;
use std::error::Error;
use std::sync::Arc;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Chat LLM Type: {}", args.chat_llm_type);
    info!("Chat Model: {}", args.chat_model.as_deref().unwrap_or("adapter default"));
    info!("Knowledge Base Path: {}", args.knowledge_base_path);
    info!("Admin Trigger: {}", args.admin_trigger);
    info!("TLS Enabled: {}", args.enable_tls);
    info!("-------------------------");

    let agent = Arc::new(CivicAgent::new(&args)?);
    let knowledge = Arc::new(KnowledgeBase::load(&args.knowledge_base_path));
    let addr = args.server_addr.clone();
    info!("Starting server on: {}", addr);
    let server = Server::new(addr, agent, knowledge, args);
    server.run().await?;

    Ok(())
}
