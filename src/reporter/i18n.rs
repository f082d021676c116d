//! Localized report narrative
//!
//! Only the title, executive summary and investment outlook are localized.
//! Highlight labels, risks and recommendations stay in English.

use serde::Serialize;

/// Report language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hindi,
    Tamil,
}

impl Language {
    /// Parse a language code. Unknown codes fall back to English.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "hi" => Language::Hindi,
            "ta" => Language::Tamil,
            _ => Language::English,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Tamil => "ta",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Localized narrative blocks for one report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Narrative {
    pub title: String,
    pub executive_summary: String,
    pub investment_outlook: String,
}

/// Build the narrative for a language and industry
pub fn narrative(language: Language, industry: &str) -> Narrative {
    match language {
        Language::Hindi => Narrative {
            title: "निवेशक वित्तीय स्वास्थ्य रिपोर्ट".to_string(),
            executive_summary: format!(
                "यह रिपोर्ट {} व्यवसाय के वित्तीय प्रदर्शन का विश्लेषण करती है।",
                industry
            ),
            investment_outlook: "व्यवसाय की वित्तीय स्थिति मजबूत है और जोखिम कम है।".to_string(),
        },
        Language::Tamil => Narrative {
            title: "முதலீட்டாளர் நிதி ஆரோக்கிய அறிக்கை".to_string(),
            executive_summary: format!(
                "இந்த அறிக்கை {} நிறுவனத்தின் நிதி செயல்திறனை மதிப்பீடு செய்கிறது.",
                industry
            ),
            investment_outlook:
                "நிறுவனத்தின் நிதி நிலை வலுவாக உள்ளது மற்றும் ஆபத்து குறைவாக உள்ளது.".to_string(),
        },
        Language::English => Narrative {
            title: "Investor-Ready Financial Health Report".to_string(),
            executive_summary: format!(
                "This report evaluates the financial performance of a {} business \
                 using uploaded financial data and analytics.",
                industry
            ),
            investment_outlook: "The business demonstrates strong financial stability with \
                                 consistent revenue growth and manageable risk exposure."
                .to_string(),
        },
    }
}

/// Numbered section headings, in report order
pub const SECTION_HEADINGS: [&str; 5] = [
    "1. Executive Summary",
    "2. Financial Highlights",
    "3. Risk Assessment",
    "4. Strategic Recommendations",
    "5. Investment Outlook",
];
