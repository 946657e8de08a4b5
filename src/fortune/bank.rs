//! The fortune message bank.
//!
//! Categories are declared once, in a fixed order. That order is used both
//! for label lookup and for flattening the bank in timestamp mode, so adding
//! a category changes which message a given timestamp shows.

/// Messages for one pattern label key.
#[derive(Debug, Clone, Copy)]
pub struct FortuneCategory {
    pub key: &'static str,
    pub messages: &'static [&'static str],
}

/// Key of the fallback category.
pub const BALANCED_KEY: &str = "balanced";

/// Shown when the band API could not be reached.
pub const APOLOGY_FORTUNE: &str =
    "The spirits are quiet right now. Our apologies, please try again in a little while.";

pub static FORTUNE_BANK: &[FortuneCategory] = &[
    FortuneCategory {
        key: BALANCED_KEY,
        messages: &[
            "Your mind walks the middle path today; every door stands open to you.",
            "Harmony is your hidden talent. Others will lean on your steadiness.",
            "A calm sea carries many ships. Your balance will carry a friend.",
            "No single wave rules you. Choose your tide with care.",
        ],
    },
    // ---------------------------------------------------------------- alpha
    FortuneCategory {
        key: "alpha_active",
        messages: &[
            "Relaxed focus is your superpower; an easy win is on its way.",
            "You move like water in motion. Flow toward the task you have been avoiding.",
            "A calm heart with busy hands builds something lasting this week.",
        ],
    },
    FortuneCategory {
        key: "alpha_clear",
        messages: &[
            "Clarity arrives quietly. Listen before you speak today.",
            "A clear pond shows the moon. Your reflection will surprise you.",
            "Ease and insight walk together; a good idea is already close.",
        ],
    },
    FortuneCategory {
        key: "alpha_meditation",
        messages: &[
            "Stillness suits you. The answer you seek is waiting in the quiet.",
            "Close your eyes and count three breaths; luck follows the patient.",
            "Your inner garden is in bloom. Invite someone to sit in it.",
        ],
    },
    FortuneCategory {
        key: "alpha_generic",
        messages: &[
            "A relaxed mind catches what a hurried one misses.",
            "Gentle waves carry you forward. Trust the current.",
            "You are more rested than you think. Spend that energy wisely.",
        ],
    },
    // ----------------------------------------------------------------- beta
    FortuneCategory {
        key: "beta_active",
        messages: &[
            "Your engine is running hot. Point it at the hardest problem first.",
            "Momentum is yours; a stalled project will start moving again.",
            "Busy hands, sharp mind. Today you out-think the obstacle.",
        ],
    },
    FortuneCategory {
        key: "beta_clear",
        messages: &[
            "Sharp thoughts, steady nerves. A decision made today will age well.",
            "You see the path and the pitfalls. Walk with confidence.",
            "Logic and calm shake hands in you. Negotiate something.",
        ],
    },
    FortuneCategory {
        key: "beta_meditation",
        messages: &[
            "Even a busy mind can rest. Let one worry go before sunset.",
            "Your thoughts race, but your body is still. Trust the stillness.",
            "Quiet the chatter and the loudest truth will remain.",
        ],
    },
    FortuneCategory {
        key: "beta_generic",
        messages: &[
            "An alert mind finds coins on the sidewalk. Keep your eyes open.",
            "Problems bow to you today. Pick the one worth solving.",
            "Your attention is a lantern. Aim it carefully.",
        ],
    },
    // ---------------------------------------------------------------- gamma
    FortuneCategory {
        key: "gamma_active",
        messages: &[
            "Sparks fly when you move. Someone will catch one and start a fire.",
            "Your mind connects dots others cannot see. Draw the line.",
            "Electric ideas favour the bold. Share yours before lunch.",
        ],
    },
    FortuneCategory {
        key: "gamma_clear",
        messages: &[
            "A flash of insight is coming. Write it down when it lands.",
            "Everything clicks together today, like a puzzle finishing itself.",
            "Brilliance with a steady hand; your next draft will be your best.",
        ],
    },
    FortuneCategory {
        key: "gamma_meditation",
        messages: &[
            "Deep calm and bright sparks: a rare mix. Create something.",
            "In silence your mind sings. Hum along.",
            "Enlightenment is a strong word, but today it fits.",
        ],
    },
    FortuneCategory {
        key: "gamma_generic",
        messages: &[
            "Your thoughts are moving at the speed of light. Make a wish.",
            "Great synthesis is near. Old knowledge will meet a new idea.",
            "A bright mind attracts bright company.",
        ],
    },
    // ---------------------------------------------------------------- theta
    FortuneCategory {
        key: "theta_active",
        messages: &[
            "Daydreams in motion become plans. Take the first step.",
            "Your imagination is restless. Give it a canvas.",
            "A wandering mind finds new roads. Follow one home.",
        ],
    },
    FortuneCategory {
        key: "theta_clear",
        messages: &[
            "Memories surface with meaning. An old lesson returns with new use.",
            "Intuition is speaking clearly. Believe it this time.",
            "The border between dream and plan is thin today. Cross it.",
        ],
    },
    FortuneCategory {
        key: "theta_meditation",
        messages: &[
            "You drift near the shore of sleep, where the best ideas wash up.",
            "Deep rest is preparing you for a bright surprise.",
            "The quiet mind remembers what the busy mind forgot.",
        ],
    },
    FortuneCategory {
        key: "theta_generic",
        messages: &[
            "Creativity is bubbling beneath the surface. Let it up for air.",
            "A dream you had will make sense soon.",
            "Your imagination is richer than your calendar. Make room for it.",
        ],
    },
    // ---------------------------------------------------------------- delta
    FortuneCategory {
        key: "delta_active",
        messages: &[
            "Your body is awake but your soul asks for rest. Listen to both.",
            "Slow and deep wins this race. Pace yourself.",
            "Restoration is in progress. Tomorrow you will feel its gift.",
        ],
    },
    FortuneCategory {
        key: "delta_clear",
        messages: &[
            "Deep waters run clear. Your roots are stronger than you know.",
            "Healing happens quietly; you are further along than yesterday.",
            "Rest is not idleness. It is the soil of future harvests.",
        ],
    },
    FortuneCategory {
        key: "delta_meditation",
        messages: &[
            "You have found the deep end of calm. Stay a while.",
            "Like the ocean floor, nothing rushes you today.",
            "Sleep well tonight; good news prefers a rested messenger.",
        ],
    },
    FortuneCategory {
        key: "delta_generic",
        messages: &[
            "A deep breath now saves ten later.",
            "Your reserves are refilling. Spend them on someone you love.",
            "Slow waves carry heavy cargo. Your patience will deliver.",
        ],
    },
    // ------------------------------------------------------ high_{band}
    FortuneCategory {
        key: "high_alpha",
        messages: &[
            "Relaxation is your compass today; follow it somewhere new.",
            "A peaceful mind is a powerful mind.",
            "You are calm enough to hear opportunity knock.",
        ],
    },
    FortuneCategory {
        key: "high_beta",
        messages: &[
            "Focus is your sword. Cut through the clutter.",
            "Your sharp mind will solve a lingering puzzle.",
            "Energy well spent today becomes rest well earned tonight.",
        ],
    },
    FortuneCategory {
        key: "high_gamma",
        messages: &[
            "Brilliant connections await; say yes to the unexpected conversation.",
            "Your mind is a lightning storm. Aim the bolts.",
            "Insight strikes twice for those who pay attention.",
        ],
    },
    FortuneCategory {
        key: "high_theta",
        messages: &[
            "Dreamers build tomorrow. Sketch your idea today.",
            "Intuition leads, logic follows. Let them walk together.",
            "The door to creativity is unlocked. Walk through.",
        ],
    },
    FortuneCategory {
        key: "high_delta",
        messages: &[
            "Deep rest brings deep wisdom.",
            "Your body knows the way. Trust its slow rhythm.",
            "Recharge now; a big adventure needs a full battery.",
        ],
    },
    // ----------------------------------------------------- high_{ml state}
    FortuneCategory {
        key: "high_focus",
        messages: &[
            "Laser focus today. Finish the thing you started.",
            "Your concentration is a rare gift; spend it on what matters.",
            "Distractions bounce off you. Make the most of it.",
        ],
    },
    FortuneCategory {
        key: "high_clear",
        messages: &[
            "A clear head sees the whole map. Choose your route.",
            "Fog lifts; a confusing situation becomes simple.",
            "Clarity is the first step of every good journey.",
        ],
    },
    FortuneCategory {
        key: "high_meditation",
        messages: &[
            "Serenity is your natural state. Return to it often.",
            "Your calm is contagious. Spread it generously.",
            "In stillness you find strength.",
        ],
    },
    FortuneCategory {
        key: "high_dream",
        messages: &[
            "Your dreams are messengers. Read their letters.",
            "Reality is only half the story. Write the other half.",
            "Tonight's dream holds tomorrow's answer.",
        ],
    },
];

/// Messages for `key`. Unknown keys fall back to the balanced list.
#[must_use]
pub fn messages_for(key: &str) -> &'static [&'static str] {
    FORTUNE_BANK
        .iter()
        .find(|c| c.key == key)
        .or_else(|| FORTUNE_BANK.iter().find(|c| c.key == BALANCED_KEY))
        .map_or(&[], |c| c.messages)
}

/// Every message in declared category order.
pub fn all_messages() -> impl Iterator<Item = &'static str> {
    FORTUNE_BANK.iter().flat_map(|c| c.messages.iter().copied())
}

/// Total number of messages across all categories.
#[must_use]
pub fn total_messages() -> usize {
    FORTUNE_BANK.iter().map(|c| c.messages.len()).sum()
}
