//! Learning paths, their FAQ content, and the accordion state used to show it.

use std::collections::BTreeSet;

use crate::routes::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicId {
    AiFundamentals,
    BusinessAi,
    Productivity,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Topic {
    pub id: TopicId,
    pub title: &'static str,
    /// One line for the home page card.
    pub summary: &'static str,
    /// Hero text on the topic page.
    pub intro: &'static str,
    pub faq: &'static [Faq],
}

pub static TOPICS: [Topic; 3] = [
    Topic {
        id: TopicId::AiFundamentals,
        title: "AI Fundamentals",
        summary: "Master the core concepts of Artificial Intelligence and Machine Learning",
        intro: "Master the core concepts of Artificial Intelligence and build a strong foundation for your AI journey.",
        faq: &[
            Faq {
                question: "What is Artificial Intelligence?",
                answer: "Artificial Intelligence (AI) refers to computer systems that can perform tasks that typically require human intelligence. These tasks include learning from experience, understanding natural language, recognizing patterns, solving problems, and making decisions. AI systems use techniques like machine learning, deep learning, and neural networks to process data and improve their performance over time.",
            },
            Faq {
                question: "What are the main types of AI?",
                answer: "There are two main types of AI: Narrow (or Weak) AI and General (or Strong) AI. Narrow AI is designed for specific tasks like facial recognition or playing chess, and it is what we use in practical applications today. General AI, which would match human-level intelligence across all domains, is still theoretical. Machine Learning is a subset of AI focused on systems that learn from data without explicit programming.",
            },
            Faq {
                question: "How does Machine Learning work?",
                answer: "Machine Learning works by analyzing patterns in data to make predictions or decisions. The process typically involves collecting and preparing data, choosing and training a model, testing the model's performance, and making predictions with new data. Common approaches include supervised learning (labeled data), unsupervised learning (finding patterns in unlabeled data), and reinforcement learning (learning through trial and error).",
            },
            Faq {
                question: "What are Neural Networks?",
                answer: "Neural Networks are computing systems inspired by biological brains. They consist of interconnected nodes (neurons) organized in layers, where each connection passes signals to the next layer. They are particularly good at pattern recognition and are the foundation of deep learning, enabling breakthroughs in computer vision and natural language processing.",
            },
            Faq {
                question: "How is AI being applied in business today?",
                answer: "AI is applied across business functions: chatbots and virtual assistants in customer service, personalized recommendations and segmentation in marketing, predictive maintenance and supply chain optimization in operations, fraud detection and risk assessment in finance, and recruitment and engagement in HR. These applications improve efficiency, reduce costs, and support better decisions.",
            },
        ],
    },
    Topic {
        id: TopicId::BusinessAi,
        title: "Business AI Integration",
        summary: "Learn how to implement AI solutions in your business processes",
        intro: "Plan, pilot and scale AI initiatives that deliver measurable value across your organization.",
        faq: &[
            Faq {
                question: "Where should a company start with AI?",
                answer: "Start with a process that is repetitive, data-rich and has a clear success metric. A small pilot with a measurable outcome builds the internal experience and trust needed for larger projects.",
            },
            Faq {
                question: "Do we need our own data science team?",
                answer: "Not at first. Many use cases are covered by existing AI services and tools. A small internal team becomes valuable once you need to adapt models to proprietary data or run several initiatives at once.",
            },
            Faq {
                question: "How do we manage the risks of AI?",
                answer: "Set clear ownership for each AI system, keep humans in the loop for high-impact decisions, document the data used, and review outputs regularly for errors and bias.",
            },
        ],
    },
    Topic {
        id: TopicId::Productivity,
        title: "Productivity with AI",
        summary: "Enhance workplace efficiency using AI-powered tools",
        intro: "Use AI assistants to draft, summarize, analyze and automate everyday work.",
        faq: &[
            Faq {
                question: "Which everyday tasks benefit most from AI assistants?",
                answer: "Drafting emails and documents, summarizing long reports or meetings, brainstorming, and turning rough notes into structured plans are where most teams see immediate time savings.",
            },
            Faq {
                question: "How do I write a good prompt?",
                answer: "Give the assistant context, a clear task, the format you want back, and an example when possible. Iterate: refine the prompt based on what comes back instead of starting over.",
            },
            Faq {
                question: "Is it safe to paste company data into AI tools?",
                answer: "Only into tools approved by your organization. Check whether the provider stores or trains on your inputs, and never share confidential or personal data with unapproved services.",
            },
        ],
    },
];

impl TopicId {
    pub fn topic(self) -> &'static Topic {
        match self {
            TopicId::AiFundamentals => &TOPICS[0],
            TopicId::BusinessAi => &TOPICS[1],
            TopicId::Productivity => &TOPICS[2],
        }
    }

    pub fn route(self) -> Route {
        match self {
            TopicId::AiFundamentals => Route::AiFundamentals {},
            TopicId::BusinessAi => Route::BusinessAi {},
            TopicId::Productivity => Route::Productivity {},
        }
    }
}

/// Which FAQ entries are expanded. Any number may be open at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accordion {
    open: BTreeSet<usize>,
}

impl Accordion {
    pub fn toggle(&mut self, index: usize) {
        if !self.open.remove(&index) {
            self.open.insert(index);
        }
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open.contains(&index)
    }
}
