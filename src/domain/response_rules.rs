//! Keyword-response engine: canned assistant replies chosen by ordered
//! substring matching.
//!
//! Rules are tested top to bottom against the lowercased input and the first
//! rule with any trigger contained in the input wins. Matching is plain
//! substring containment, so "abuy" matches "buy" and "this" matches "hi".

use crate::{
    domain::chat::{ChatAction, ChatOption},
    usecases::contracts::RandomSource,
};

/// A quick-reply button in a canned reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleOption {
    pub icon: Option<&'static str>,
    pub label: &'static str,
}

const fn opt(icon: &'static str, label: &'static str) -> RuleOption {
    RuleOption {
        icon: Some(icon),
        label,
    }
}

const fn plain(label: &'static str) -> RuleOption {
    RuleOption { icon: None, label }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CannedReply {
    pub text: &'static str,
    pub options: &'static [RuleOption],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseRule {
    pub name: &'static str,
    pub triggers: &'static [&'static str],
    pub reply: CannedReply,
}

impl ResponseRule {
    fn matches(&self, normalized: &str) -> bool {
        self.triggers
            .iter()
            .any(|trigger| normalized.contains(trigger))
    }
}

/// Engine output, ready to be appended as an assistant message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub options: Option<Vec<ChatOption>>,
    /// Name of the matched rule, or `None` for a fallback reply.
    pub rule: Option<&'static str>,
}

impl Reply {
    fn from_canned(canned: &CannedReply, rule: Option<&'static str>) -> Self {
        let options = (!canned.options.is_empty()).then(|| {
            canned
                .options
                .iter()
                .map(|option| match option.icon {
                    Some(icon) => ChatOption::new(option.label).with_icon(icon),
                    None => ChatOption::new(option.label),
                })
                .collect()
        });

        Self {
            text: canned.text.to_owned(),
            options,
            rule,
        }
    }
}

pub const RESPONSE_RULES: &[ResponseRule] = &[
    ResponseRule {
        name: "greeting",
        triggers: &["hello", "hi", "hey"],
        reply: CannedReply {
            text: "Hey there! 👋 I'm your CryptoHomes AI assistant. I'm here to help you find the perfect property investment in Dubai. Are you looking to buy, invest, or just exploring the market?",
            options: &[
                opt("🏠", "Buy a Property"),
                opt("📈", "Investment Advice"),
                opt("🔍", "Just Browsing"),
            ],
        },
    },
    ResponseRule {
        name: "buy",
        triggers: &["buy", "purchase"],
        reply: CannedReply {
            text: "Great choice! Dubai's real estate market is booming 🚀 What type of property interests you most? We have stunning options from luxury penthouses in Palm Jumeirah to modern apartments in Dubai Marina.",
            options: &[
                opt("🏢", "Apartment"),
                opt("🏠", "Villa"),
                opt("🌆", "Penthouse"),
                opt("💰", "Best Deals"),
            ],
        },
    },
    ResponseRule {
        name: "invest",
        triggers: &["invest", "investment"],
        reply: CannedReply {
            text: "Smart thinking! 💡 Dubai offers excellent ROI opportunities. Currently, properties in Downtown Dubai and Palm Jumeirah are showing 8-12% annual returns. What's your investment budget range?",
            options: &[
                plain("Under AED 2M"),
                plain("AED 2M - 5M"),
                plain("AED 5M - 10M"),
                plain("Above AED 10M"),
            ],
        },
    },
    ResponseRule {
        name: "budget",
        triggers: &["budget", "price", "aed", "million"],
        reply: CannedReply {
            text: "Perfect! Within that range, I'd recommend checking out our featured properties in Dubai Marina and Business Bay. They offer great value and strong rental yields. Would you like me to show you some specific listings?",
            options: &[
                opt("📱", "Show Listings"),
                opt("📊", "Market Analysis"),
                opt("🗓️", "Schedule Viewing"),
            ],
        },
    },
    ResponseRule {
        name: "crypto",
        triggers: &["crypto", "bitcoin", "btc", "ethereum"],
        reply: CannedReply {
            text: "Yes! We fully support crypto payments 🪙 You can purchase any of our properties using Bitcoin, Ethereum, USDT, and 50+ other cryptocurrencies. The transaction is seamless and blockchain-verified. Would you like to know more about the process?",
            options: &[
                opt("🔗", "How it Works"),
                opt("💱", "Conversion Rates"),
                opt("🛡️", "Security Info"),
            ],
        },
    },
    ResponseRule {
        name: "palm",
        triggers: &["palm", "jumeirah"],
        reply: CannedReply {
            text: "Palm Jumeirah is absolutely stunning! 🌴 We have exclusive listings there starting from AED 5M. The beachfront villas offer private beaches, and the apartments have breathtaking sea views. It's one of Dubai's most prestigious addresses!",
            options: &[
                opt("🏠", "View Villas"),
                opt("🏢", "View Apartments"),
                opt("📍", "Area Guide"),
            ],
        },
    },
    ResponseRule {
        name: "marina",
        triggers: &["marina", "downtown"],
        reply: CannedReply {
            text: "Excellent choice! Dubai Marina is perfect for waterfront living with vibrant nightlife 🌃 Downtown is the heart of the city with Burj Khalifa views! Both areas have strong rental demand. What matters more to you - lifestyle or investment returns?",
            options: &[
                opt("🎉", "Lifestyle First"),
                opt("💰", "Returns First"),
                opt("⚖️", "Balance Both"),
            ],
        },
    },
    ResponseRule {
        name: "viewing",
        triggers: &["viewing", "visit", "schedule"],
        reply: CannedReply {
            text: "I'd be happy to arrange a viewing! 📅 Our property consultants are available 7 days a week. We can also do virtual tours if you're not in Dubai yet. When would be a good time for you?",
            options: &[
                opt("📹", "Virtual Tour"),
                opt("🗓️", "This Week"),
                opt("📞", "Call Me Back"),
            ],
        },
    },
    ResponseRule {
        name: "apartment",
        triggers: &["apartment", "flat"],
        reply: CannedReply {
            text: "We have beautiful apartments ranging from cozy studios to spacious 4-bedrooms! 🏢 Popular areas include Dubai Marina (great for expats), Downtown (iconic views), and JBR (beach lifestyle). What size are you looking for?",
            options: &[
                plain("Studio/1BR"),
                plain("2-3 Bedrooms"),
                plain("4+ Bedrooms"),
            ],
        },
    },
    ResponseRule {
        name: "villa",
        triggers: &["villa", "house"],
        reply: CannedReply {
            text: "Our villa portfolio is impressive! 🏡 From Emirates Hills mansions to Arabian Ranches family homes. Most come with private pools, gardens, and smart home features. Are you looking for something specific - family home or luxury showcase?",
            options: &[
                opt("👨‍👩‍👧", "Family Home"),
                opt("✨", "Luxury Estate"),
                opt("🌴", "Beachfront"),
            ],
        },
    },
];

pub const FALLBACK_REPLIES: &[CannedReply] = &[
    CannedReply {
        text: "That's interesting! Tell me more about what you're looking for. Are you focused on a specific area in Dubai, or would you like me to recommend some top locations based on your preferences?",
        options: &[
            opt("🗺️", "Show Areas"),
            opt("⭐", "Top Picks"),
            opt("💬", "More Questions"),
        ],
    },
    CannedReply {
        text: "I'd love to help you with that! Dubai has so much to offer - from stunning waterfront properties to serene golf course communities. What's your top priority when choosing a home?",
        options: &[
            opt("📍", "Location"),
            opt("💵", "Price"),
            opt("🏊", "Amenities"),
        ],
    },
    CannedReply {
        text: "Great question! Let me think about that... 🤔 Based on current market trends, I'd say now is actually a great time to invest. The expo effect is still driving growth, and new infrastructure projects are boosting property values.",
        options: &[
            opt("📈", "Market Trends"),
            opt("🆕", "New Projects"),
            opt("🏆", "Best Deals"),
        ],
    },
];

/// Opening message shown when a chat session starts.
pub const WELCOME: CannedReply = CannedReply {
    text: "Hi! 👋 I'm Luna, your CryptoHomes AI assistant. I can help you find the perfect property investment in Dubai. What are you looking for today?",
    options: &[
        opt("🏠", "Buy Property"),
        opt("📈", "Investment Tips"),
        opt("💰", "Crypto Payments"),
        opt("🔍", "Browse Areas"),
    ],
};

/// Shortcut buttons under the chat log: label and the prompt they send.
pub const QUICK_ACTIONS: &[(&str, &str)] = &[
    ("Properties", "Show me properties"),
    ("Investment", "Investment advice"),
    ("Areas", "Best areas in Dubai"),
    ("Budget", "Properties under 5 million"),
];

pub fn welcome_reply() -> Reply {
    Reply::from_canned(&WELCOME, None)
}

pub fn quick_action_options() -> Vec<ChatOption> {
    QUICK_ACTIONS
        .iter()
        .map(|(label, prompt)| ChatOption {
            label: (*label).to_owned(),
            icon: None,
            action: Some(ChatAction::Send((*prompt).to_owned())),
        })
        .collect()
}

/// Returns the first rule whose triggers occur in `input`, ignoring case.
pub fn match_rule(input: &str) -> Option<&'static ResponseRule> {
    let normalized = input.to_lowercase();
    RESPONSE_RULES.iter().find(|rule| rule.matches(&normalized))
}

/// Produces the canned reply for `input`, falling back to a random generic
/// reply when no rule matches. Callers must reject blank input beforehand.
pub fn respond(input: &str, rng: &mut dyn RandomSource) -> Reply {
    match match_rule(input) {
        Some(rule) => Reply::from_canned(&rule.reply, Some(rule.name)),
        None => {
            let index = rng.pick(FALLBACK_REPLIES.len());
            Reply::from_canned(&FALLBACK_REPLIES[index], None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedRandom;

    fn labels(reply: &Reply) -> Vec<&str> {
        reply
            .options
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|option| option.label.as_str())
            .collect()
    }

    #[test]
    fn greeting_returns_three_options() {
        let mut rng = ScriptedRandom::constant(0.0);

        let reply = respond("hi", &mut rng);

        assert_eq!(reply.rule, Some("greeting"));
        assert_eq!(
            labels(&reply),
            vec!["Buy a Property", "Investment Advice", "Just Browsing"]
        );
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn earlier_rule_wins_when_several_match() {
        let mut rng = ScriptedRandom::constant(0.0);

        let reply = respond("I want to invest 3 million AED", &mut rng);

        assert_eq!(reply.rule, Some("invest"));
        assert!(reply.text.starts_with("Smart thinking!"));
    }

    #[test]
    fn buy_precedes_invest() {
        assert_eq!(
            match_rule("should I buy or invest?").map(|rule| rule.name),
            Some("buy")
        );
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(
            match_rule("PALM JUMEIRAH please").map(|rule| rule.name),
            Some("palm")
        );
    }

    #[test]
    fn matching_is_substring_not_word_based() {
        assert_eq!(match_rule("abuy").map(|rule| rule.name), Some("buy"));
        assert_eq!(match_rule("which one").map(|rule| rule.name), Some("greeting"));
    }

    #[test]
    fn every_trigger_selects_its_rule_or_an_earlier_one() {
        for (position, rule) in RESPONSE_RULES.iter().enumerate() {
            for trigger in rule.triggers {
                let matched = match_rule(trigger).expect("trigger must match some rule");
                let matched_position = RESPONSE_RULES
                    .iter()
                    .position(|candidate| candidate.name == matched.name)
                    .expect("matched rule is in table");

                assert!(matched_position <= position, "trigger {trigger}");
            }
        }
    }

    #[test]
    fn unmatched_input_uses_random_fallback() {
        let mut first = ScriptedRandom::constant(0.0);
        let mut last = ScriptedRandom::constant(0.99);

        let a = respond("what about golf courses", &mut first);
        let b = respond("what about golf courses", &mut last);

        assert_eq!(a.rule, None);
        assert_eq!(a.text, FALLBACK_REPLIES[0].text);
        assert_eq!(b.text, FALLBACK_REPLIES[2].text);
        assert_eq!(first.draws(), 1);
    }

    #[test]
    fn fallback_table_has_at_least_three_entries() {
        assert!(FALLBACK_REPLIES.len() >= 3);
    }

    #[test]
    fn quick_actions_send_their_prompts() {
        let options = quick_action_options();

        assert_eq!(options.len(), 4);
        assert_eq!(options[3].outgoing_text(), "Properties under 5 million");
        assert_eq!(
            match_rule(options[3].outgoing_text()).map(|rule| rule.name),
            Some("budget")
        );
    }

    #[test]
    fn welcome_has_four_options() {
        assert_eq!(welcome_reply().options.map(|options| options.len()), Some(4));
    }
}
