//! Offline keyword responder.
//!
//! Maps a question to one of a handful of canned advisory paragraphs by
//! case-insensitive substring matching. No network, no state.

use crate::client::Responder;
use async_trait::async_trait;
use tracing::debug;

pub const TOMATO_ADVICE: &str = "**Tomato cultivation tips:**\n\n\
- Best planting time is at the start of the cool season, once night temperatures stay above 15°C.\n\
- Raise seedlings in a nursery and transplant after 25-30 days.\n\
- Keep 60 cm between rows and 45 cm between plants.\n\
- Water regularly but avoid waterlogging; drip irrigation works well.\n\
- Stake the plants early to keep fruit off the soil.";

pub const PEST_ADVICE: &str = "**Pest and disease management:**\n\n\
- Inspect leaves, stems and the underside of leaves at least twice a week.\n\
- Remove and destroy infected plants to stop the spread.\n\
- Use neem oil spray (5 ml per litre of water) as a first organic defence.\n\
- Install yellow sticky traps for whiteflies and aphids.\n\
- Rotate crops every season to break pest cycles.\n\
- Contact your local agricultural officer if more than 10% of plants are affected.";

pub const FERTILIZER_ADVICE: &str = "**Organic fertilizer guide:**\n\n\
- Apply 10-15 tonnes of well-rotted farmyard manure per hectare before sowing.\n\
- Vermicompost improves soil structure and adds micronutrients.\n\
- Grow green manure crops such as sunhemp or dhaincha and plough them in before flowering.\n\
- Use bio-fertilizers like Rhizobium and Azotobacter for nitrogen fixation.\n\
- Get a soil test every two years to balance nutrients correctly.";

pub const SUBSIDY_ADVICE: &str = "**Government schemes and subsidies:**\n\n\
- PM-KISAN provides direct income support to small and marginal farmers.\n\
- Soil Health Card scheme offers free soil testing and recommendations.\n\
- Pradhan Mantri Fasal Bima Yojana covers crop loss from natural calamities.\n\
- Subsidies are available for drip and sprinkler irrigation equipment.\n\
- Visit your nearest Krishi Vigyan Kendra or agriculture office with your land records to apply.";

pub const WEATHER_ADVICE: &str = "**Weather and climate planning:**\n\n\
- Check the local forecast before sowing, spraying or harvesting.\n\
- Avoid spraying pesticides when rain is expected within 24 hours.\n\
- Mulch the soil to retain moisture during dry spells.\n\
- Choose drought-tolerant or short-duration varieties when the monsoon is delayed.\n\
- Build farm ponds to harvest rainwater for critical irrigation.";

pub const GENERAL_ADVICE: &str = "Thank you for your question! I can help with crop management, \
pest and disease control, organic fertilizers, government subsidies and weather planning. \
Could you share more details, such as your crop, location and current growth stage, \
so I can give you more specific advice?";

/// Picks the canned paragraph for `question`.
///
/// Precedence: tomato, then pest/disease, then fertilizer/organic, then
/// subsidy/government, then weather/climate, else the general reply.
pub fn bot_response(question: &str) -> &'static str {
    let question = question.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|k| question.contains(k));

    if mentions(&["tomato"]) {
        TOMATO_ADVICE
    } else if mentions(&["pest", "disease"]) {
        PEST_ADVICE
    } else if mentions(&["fertilizer", "organic"]) {
        FERTILIZER_ADVICE
    } else if mentions(&["subsidy", "government"]) {
        SUBSIDY_ADVICE
    } else if mentions(&["weather", "climate"]) {
        WEATHER_ADVICE
    } else {
        GENERAL_ADVICE
    }
}

/// [`Responder`] backed by [`bot_response`]; ignores the language.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackResponder;

#[async_trait]
impl Responder for FallbackResponder {
    async fn respond(&self, question: &str, _language: &str) -> String {
        debug!("Answering from the offline responder");
        bot_response(question).to_string()
    }
}
