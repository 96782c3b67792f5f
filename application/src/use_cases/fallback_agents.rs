//! Fallback tiers.
//!
//! - [`KnowledgeAgent`]: one tool-free model call grounded on the knowledge port
//! - [`EmergencyAgent`]: a canned in-character apology, no external calls

use crate::ports::knowledge::KnowledgePort;
use crate::ports::llm_gateway::LlmGateway;
use crate::use_cases::agent::{Agent, AgentError};
use crate::use_cases::shared::{is_cancelled, with_timeout};
use async_trait::async_trait;
use droidmind_domain::{AgentContext, AgentResult, Message, PersonaPrompt, Tier, ULTIMATE_APOLOGY};
use rand::seq::SliceRandom;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Secondary tier: answers from retrieved knowledge without tools.
pub struct KnowledgeAgent<G: LlmGateway, K: KnowledgePort> {
    gateway: Arc<G>,
    knowledge: Arc<K>,
    persona: PersonaPrompt,
    model_timeout: Option<Duration>,
    cancellation: Option<CancellationToken>,
}

impl<G: LlmGateway, K: KnowledgePort> KnowledgeAgent<G, K> {
    pub fn new(gateway: Arc<G>, knowledge: Arc<K>) -> Self {
        Self {
            gateway,
            knowledge,
            persona: PersonaPrompt::default(),
            model_timeout: Some(Duration::from_secs(60)),
            cancellation: None,
        }
    }

    pub fn with_persona(mut self, persona: PersonaPrompt) -> Self {
        self.persona = persona;
        self
    }

    pub fn with_model_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.model_timeout = timeout;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub async fn run(&self, ctx: &AgentContext) -> Result<(String, Vec<Message>), AgentError> {
        if is_cancelled(&self.cancellation) {
            return Err(AgentError::Cancelled);
        }

        let knowledge = match self.knowledge.lookup(&ctx.user_message).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Knowledge lookup failed, answering without it");
                String::new()
            }
        };

        let user = Message::user(&ctx.user_message);
        let mut transcript = vec![Message::system(&self.persona.fallback_prompt)];
        if let Some(summary) = ctx.summary.as_deref().filter(|s| !s.trim().is_empty()) {
            transcript.push(Message::developer(PersonaPrompt::summary_block(summary)));
        }
        transcript.extend(ctx.memory_window.iter().cloned());
        if !knowledge.trim().is_empty() {
            transcript.push(Message::developer(PersonaPrompt::knowledge_block(&knowledge)));
        }
        transcript.push(user.clone());

        if is_cancelled(&self.cancellation) {
            return Err(AgentError::Cancelled);
        }
        let response = with_timeout(self.model_timeout, self.gateway.call_model(&transcript, None))
            .await
            .map_err(AgentError::Timeout)??;

        let answer = response.text_content().trim().to_string();
        if answer.is_empty() {
            return Err(AgentError::EmptyAnswer);
        }
        info!("Secondary tier produced an answer");
        Ok((answer.clone(), vec![user, Message::assistant(answer)]))
    }
}

#[async_trait]
impl<G: LlmGateway + 'static, K: KnowledgePort + 'static> Agent for KnowledgeAgent<G, K> {
    fn tier(&self) -> Tier {
        Tier::Secondary
    }

    async fn execute(&self, ctx: &AgentContext) -> AgentResult {
        match self.run(ctx).await {
            Ok((answer, messages)) => AgentResult::answer(answer, messages),
            Err(e) => AgentResult::failure(e.to_string()),
        }
    }
}

/// Last tier: always answers with an apology.
#[derive(Debug, Clone, Default)]
pub struct EmergencyAgent {
    persona: PersonaPrompt,
}

impl EmergencyAgent {
    pub fn new(persona: PersonaPrompt) -> Self {
        Self { persona }
    }

    pub fn apology(&self) -> String {
        self.persona
            .apology_pool()
            .choose(&mut rand::thread_rng())
            .map_or(ULTIMATE_APOLOGY, |s| *s)
            .to_string()
    }
}

#[async_trait]
impl Agent for EmergencyAgent {
    fn tier(&self) -> Tier {
        Tier::Emergency
    }

    async fn execute(&self, ctx: &AgentContext) -> AgentResult {
        let apology = self.apology();
        let messages = vec![
            Message::user(&ctx.user_message),
            Message::assistant(&apology),
        ];
        AgentResult::answer(apology, messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::knowledge::KnowledgeError;
    use crate::ports::llm_gateway::GatewayError;
    use crate::use_cases::test_support::{ScriptedGateway, ScriptedResponse, StubKnowledge};
    use droidmind_domain::Role;

    fn knowledge_agent(
        responses: Vec<ScriptedResponse>,
        knowledge: Result<String, KnowledgeError>,
    ) -> (KnowledgeAgent<ScriptedGateway, StubKnowledge>, Arc<ScriptedGateway>) {
        let gateway = Arc::new(ScriptedGateway::new(responses));
        let agent = KnowledgeAgent::new(gateway.clone(), Arc::new(StubKnowledge(knowledge)));
        (agent, gateway)
    }

    #[tokio::test]
    async fn test_knowledge_is_passed_to_the_model_without_tools() {
        let (agent, gateway) = knowledge_agent(
            vec![ScriptedResponse::text("Chewbacca is a Wookiee warrior.")],
            Ok("Chewbacca: Wookiee, co-pilot of the Falcon".to_string()),
        );
        let ctx = AgentContext::new("s1", "Who is Chewbacca?")
            .with_summary(Some("Talked about Han.".to_string()));
        let result = agent.execute(&ctx).await;

        assert_eq!(result.answer_text(), Some("Chewbacca is a Wookiee warrior."));
        let call = &gateway.recorded()[0];
        assert!(!call.tools_offered);
        let roles: Vec<Role> = call.transcript.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::Developer, Role::Developer, Role::User]
        );
        assert!(call.transcript[2].content.contains("co-pilot"));
        assert_eq!(result.messages.len(), 2);
    }

    #[tokio::test]
    async fn test_lookup_failure_still_calls_model() {
        let (agent, gateway) = knowledge_agent(
            vec![ScriptedResponse::text("I believe he is a Wookiee.")],
            Err(KnowledgeError::Unavailable("offline".to_string())),
        );
        let result = agent.execute(&AgentContext::new("s1", "Who is Chewbacca?")).await;

        assert!(result.is_success());
        let roles: Vec<Role> = gateway.recorded()[0].transcript.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User]);
    }

    #[tokio::test]
    async fn test_gateway_failure_fails_the_tier() {
        let (agent, _) = knowledge_agent(
            vec![ScriptedResponse::Error(GatewayError::Timeout)],
            Ok(String::new()),
        );
        let result = agent.execute(&AgentContext::new("s1", "Hi")).await;
        assert!(!result.is_success());
        assert!(result.error_content.is_some());
    }

    #[tokio::test]
    async fn test_emergency_agent_always_answers_from_pool() {
        let persona = PersonaPrompt {
            apologies: vec!["Sorry, cadet.".to_string(), "Static on the line.".to_string()],
            ..Default::default()
        };
        let agent = EmergencyAgent::new(persona.clone());
        for _ in 0..10 {
            let result = agent.execute(&AgentContext::new("s1", "Hi")).await;
            let answer = result.answer_text().unwrap();
            assert!(persona.apologies.iter().any(|a| a == answer));
            assert_eq!(result.messages.len(), 2);
        }
    }

    #[tokio::test]
    async fn test_emergency_agent_with_blank_pool_uses_defaults() {
        let persona = PersonaPrompt {
            apologies: vec!["  ".to_string()],
            ..Default::default()
        };
        let agent = EmergencyAgent::new(persona.clone());
        let answer = agent.apology();
        assert!(persona.apology_pool().contains(&answer.as_str()));
        assert_eq!(agent.tier(), Tier::Emergency);
    }
}
