pub mod api;

use crate::agent::CivicAgent;
use crate::cli::Args;
use crate::knowledge::KnowledgeBase;
use crate::session::AnswerSource;
use std::error::Error;
use std::sync::Arc;

pub struct Server {
    addr: String,
    agent: Arc<CivicAgent>,
    knowledge: Arc<KnowledgeBase>,
    args: Args,
}

impl Server {
    pub fn new(
        addr: String,
        agent: Arc<CivicAgent>,
        knowledge: Arc<KnowledgeBase>,
        args: Args,
    ) -> Self {
        Self {
            addr,
            agent,
            knowledge,
            args,
        }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        api::start_http_server(
            &self.addr,
            self.agent.clone() as Arc<dyn AnswerSource>,
            self.knowledge.clone(),
            self.args.clone(),
        )
        .await
    }
}
