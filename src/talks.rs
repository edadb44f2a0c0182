//! Speaking engagements

use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;

/// A conference talk or presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Talk {
    pub id: String,
    pub title: String,
    pub description: String,
    pub event: String,
    /// ISO-8601 date
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slides: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

/// Read-only list of talks, fixed for the lifetime of a build
#[derive(Debug, Clone)]
pub struct TalkCatalog {
    talks: Vec<Talk>,
}

impl TalkCatalog {
    pub fn new(talks: Vec<Talk>) -> Self {
        let talks = talks.into_iter().map(normalize).collect();
        Self { talks }
    }

    /// Talks from the config, or the built-in list when none are configured
    pub fn from_config(config: &SiteConfig) -> Self {
        if config.talks.is_empty() {
            Self::builtin()
        } else {
            Self::new(config.talks.clone())
        }
    }

    /// Every talk, in catalog order
    pub fn list_all(&self) -> &[Talk] {
        &self.talks
    }

    /// Talks flagged for prominent display
    pub fn list_featured(&self) -> Vec<&Talk> {
        self.talks.iter().filter(|t| t.featured).collect()
    }

    /// Everything that is not featured
    pub fn list_others(&self) -> Vec<&Talk> {
        self.talks.iter().filter(|t| !t.featured).collect()
    }

    pub fn builtin() -> Self {
        Self::new(vec![
            Talk {
                id: "nerdearla-2024".to_string(),
                title: "From Flask to FastAPI: A Journey to Better Performance and Scalability"
                    .to_string(),
                description: FLASK_TO_FASTAPI.trim().to_string(),
                event: "Nerdearla 2024".to_string(),
                date: "2024-03-15".to_string(),
                location: Some("Buenos Aires, Argentina".to_string()),
                video: Some("https://www.youtube.com/watch?v=example".to_string()),
                slides: Some("/JuanRodriguezMonti-FromFlasktoFastAPI-rev1.0.pdf".to_string()),
                tags: tags(&["python", "fastapi", "flask", "backend", "performance", "migration"]),
                featured: true,
            },
            Talk {
                id: "pycon-es-2016-events".to_string(),
                title: "My Experience Organizing Python Events Using Python!".to_string(),
                description: "I'll share how to organize a Python event using Python-developed \
                    tools. I'll present well-known tools applied to event organization and also \
                    other Free Software developments, both our own and from colleagues with whom \
                    we've organized several events in Argentina, that will simplify the tasks for \
                    organizers and speakers. I aim to provide a comprehensive view of how to start \
                    organizing an event from scratch to its most complex parts."
                    .to_string(),
                event: "PyCon España 2016".to_string(),
                date: "2016-05-07".to_string(),
                location: Some("Almería, Spain".to_string()),
                video: Some("https://www.youtube.com/watch?v=6RGGFUY7quk".to_string()),
                slides: None,
                tags: tags(&["python", "events", "organization", "community"]),
                featured: false,
            },
            Talk {
                id: "pycon-es-2016-pyqt".to_string(),
                title: "Introduction to PyQt".to_string(),
                description: "This talk aims to address a common issue that arises for new \
                    programmers approaching PyQt: the learning curve, as it's not simple to start \
                    using PyQt for beginners. Introduction, framework presentation, and much more."
                    .to_string(),
                event: "PyCon España 2016".to_string(),
                date: "2016-05-07".to_string(),
                location: Some("Almería, Spain".to_string()),
                video: Some("https://www.youtube.com/watch?v=fepmBpDjfNg".to_string()),
                slides: None,
                tags: tags(&["python", "pyqt", "gui", "development"]),
                featured: false,
            },
        ])
    }
}

impl Default for TalkCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

/// Blank optional links are the same as missing ones
fn normalize(mut talk: Talk) -> Talk {
    for field in [&mut talk.location, &mut talk.video, &mut talk.slides] {
        if field.as_deref().is_some_and(|s| s.trim().is_empty()) {
            *field = None;
        }
    }
    talk
}

const FLASK_TO_FASTAPI: &str = "
Join this talk to discover how I migrated from Flask to FastAPI and completely transformed a backend application to improve its performance and scalability. In this session, I'll share my experience and lessons learned during this migration process, from initial motivations to challenges and benefits obtained.

We'll start by exploring the limitations and issues I faced with Flask, and how these led me to consider FastAPI as an alternative. We'll look at the fundamental differences between Flask and FastAPI in terms of architecture, performance, and ease of use.

Then, we'll dive into the migration process itself, covering how to migrate routes, manage dependencies, and configure middleware. We'll analyze how FastAPI facilitates the creation of fast and efficient APIs thanks to its integration with Pydantic and its native ability to handle asynchronicity.

Additionally, we'll discuss how the application's performance improved after the migration, including load tests and comparative benchmarks. I'll also talk about scalability and how FastAPI, combined with tools like Uvicorn and Docker, facilitates deployment and management in production environments.

Finally, I'll share practical tips and best practices for those considering a similar migration. This talk is ideal for developers looking to modernize their backend applications, improve performance, and learn about the advantages of FastAPI over Flask.
";
