//! Compiled-in verse tables.
//!
//! Verse renderings are loose paraphrases of the Mulamadhyamakakarika
//! written for this project. Tags must name an animation registered in
//! [`crate::animations::builtin_registry`].

use crate::content::{Chapter, ContentEntry};

pub static CHAPTERS: &[Chapter] = &[CHAPTER_1, CHAPTER_15, CHAPTER_24];

pub const CHAPTER_1: Chapter = Chapter {
    number: 1,
    title: "Examination of Conditions",
    subtitle: "Nothing arises from itself, from another, from both, or without cause",
    entries: &[
        ContentEntry {
            id: 1,
            display_text: "Not from itself, not from another, not from both, nor without a cause: \
                           nowhere, at any time, does any thing arise.",
            concept_text: "The four alternatives of arising",
            parallel_text: "Superposition: before measurement a state is not one outcome, \
                            not the other, and not a simple mixture of both.",
            explanation_text: "Each candidate account of production is examined and set aside. \
                               What remains is not a fifth kind of arising but the absence of \
                               an arising that belongs to the thing from its own side.",
            animation_tag: "superposition",
        },
        ContentEntry {
            id: 2,
            display_text: "There are four conditions: the cause, the object, the immediate \
                           and the dominant. There is no fifth.",
            concept_text: "Conditions as relations",
            parallel_text: "Entanglement: the properties of one particle are only defined \
                            together with its partner.",
            explanation_text: "The conditions are listed so that they can be questioned. None \
                               of them holds an effect inside it; the effect appears only in \
                               the relation.",
            animation_tag: "entanglement",
        },
        ContentEntry {
            id: 3,
            display_text: "The essence of things is not found in their conditions. Where no \
                           own-nature exists, no other-nature exists either.",
            concept_text: "No essence in the conditions",
            parallel_text: "Interference: the pattern on the screen is in neither source \
                            alone.",
            explanation_text: "If the effect were already present in its conditions it would \
                               not need to arise; if it were wholly absent nothing could bring \
                               it about.",
            animation_tag: "interference",
        },
        ContentEntry {
            id: 5,
            display_text: "Things are called conditions because something arises in \
                           dependence on them. So long as nothing arises, why are they not \
                           non-conditions?",
            concept_text: "Conditions defined by their effects",
            parallel_text: "Wave and particle: the same quantum shows either face depending \
                            on how it is observed.",
            explanation_text: "A condition is only a condition relative to what it conditions. \
                               The label borrows its meaning from the very thing it is said to \
                               produce.",
            animation_tag: "double_slit",
        },
        ContentEntry {
            id: 7,
            display_text: "When neither an existent, a non-existent, nor a both-existent-and-\
                           non-existent thing is produced, how can a producing cause be \
                           coherent?",
            concept_text: "Production of the existent and non-existent",
            parallel_text: "Vacuum fluctuations: pairs appear and vanish without a settled \
                            origin.",
            explanation_text: "An existent thing does not need producing and a non-existent \
                               one cannot be produced. The pairs that flicker in and out are a \
                               picture of appearance without a solid coming-into-being.",
            animation_tag: "vacuum_fluctuation",
        },
        ContentEntry {
            id: 10,
            display_text: "Since things without essence have no real existence, the statement \
                           'when this is, that arises' is not tenable as a claim about \
                           essences.",
            concept_text: "Dependent arising without essence",
            parallel_text: "Decoherence: interaction with an environment makes definite \
                            facts emerge, and they dissolve back when isolation returns.",
            explanation_text: "Dependent arising is not a mechanism linking self-standing \
                               things; it describes how appearances hold together while none \
                               of them stands alone.",
            animation_tag: "decoherence",
        },
    ],
};

pub const CHAPTER_15: Chapter = Chapter {
    number: 15,
    title: "Examination of Essence",
    subtitle: "Svabhava cannot be produced by causes and conditions",
    entries: &[
        ContentEntry {
            id: 1,
            display_text: "It is not reasonable for essence to arise from causes and \
                           conditions. An essence that arose that way would be something \
                           made.",
            concept_text: "Essence cannot be made",
            parallel_text: "Uncertainty: sharpening position broadens momentum; no state \
                            fixes both.",
            explanation_text: "An essence is by definition uncreated and independent. Anything \
                               that depends on conditions is thereby shown to lack it.",
            animation_tag: "uncertainty",
        },
        ContentEntry {
            id: 2,
            display_text: "How could essence ever be something made? Essence is not \
                           contrived and does not depend on anything else.",
            concept_text: "Independence",
            parallel_text: "Tunneling: a particle crosses a barrier that a fixed, \
                            classical nature would forbid.",
            explanation_text: "The verse states the defining marks of essence so that the \
                               following verses can show nothing has them.",
            animation_tag: "tunneling",
        },
        ContentEntry {
            id: 10,
            display_text: "'It exists' is the grasping of permanence; 'it does not exist' is \
                           the view of annihilation. The wise do not dwell in existence or \
                           non-existence.",
            concept_text: "Avoiding both extremes",
            parallel_text: "Superposition again: neither 'up' nor 'down' describes the state \
                            before it is met.",
            explanation_text: "The middle way is not a compromise between the two views but a \
                               refusal of the shared assumption of essence behind both.",
            animation_tag: "superposition",
        },
    ],
};

pub const CHAPTER_24: Chapter = Chapter {
    number: 24,
    title: "Examination of the Noble Truths",
    subtitle: "Emptiness is what makes the world workable",
    entries: &[
        ContentEntry {
            id: 8,
            display_text: "The Buddhas teach by relying on two truths: the conventional \
                           truth of the world and the ultimate truth.",
            concept_text: "The two truths",
            parallel_text: "Complementarity: wave and particle descriptions are both needed, \
                            each in its own context.",
            explanation_text: "Conventional truth is not an error to be discarded; it is the \
                               ground on which the ultimate can be pointed out at all.",
            animation_tag: "double_slit",
        },
        ContentEntry {
            id: 14,
            display_text: "For one to whom emptiness makes sense, everything makes sense. \
                           For one to whom emptiness does not make sense, nothing does.",
            concept_text: "Emptiness enables function",
            parallel_text: "The quantum vacuum is not nothing: its fluctuations underlie \
                            every field excitation.",
            explanation_text: "Because things lack fixed essence they can change, interact \
                               and be caused. A world of essences would be frozen.",
            animation_tag: "vacuum_fluctuation",
        },
        ContentEntry {
            id: 18,
            display_text: "Whatever arises dependently is explained to be emptiness. That is \
                           a dependent designation, and it is itself the middle way.",
            concept_text: "Dependent origination is emptiness",
            parallel_text: "Entangled pairs: neither particle carries its outcome alone, yet \
                            the correlation is perfectly lawful.",
            explanation_text: "Emptiness is not a hidden substance behind appearances. It is \
                               another name for their dependence, and that name is itself a \
                               dependent designation.",
            animation_tag: "entanglement",
        },
        ContentEntry {
            id: 19,
            display_text: "There is nothing that is not dependently arisen. Therefore there \
                           is nothing that is not empty.",
            concept_text: "Universality of emptiness",
            parallel_text: "Waves from two sources interfere everywhere in the field; no \
                            point is untouched by both.",
            explanation_text: "The argument generalises: if dependence is universal, so is \
                               the absence of essence.",
            animation_tag: "interference",
        },
        ContentEntry {
            id: 20,
            display_text: "If all this were not empty there would be no arising and no \
                           ceasing, and the four noble truths would not exist for you.",
            concept_text: "Without emptiness there is no path",
            parallel_text: "Coherence is fragile: environments break it, and isolation lets \
                            it return.",
            explanation_text: "Suffering, its origin, its cessation and the path all require \
                               change. Only what is empty of fixed nature can change.",
            animation_tag: "decoherence",
        },
        ContentEntry {
            id: 38,
            display_text: "If there were essence, the world would be unproduced, unceasing \
                           and static, devoid of its variety of states.",
            concept_text: "A world of essences would be static",
            parallel_text: "Tunneling shows transitions that a fixed classical nature would \
                            forbid.",
            explanation_text: "The reductio closes the chapter: essence would abolish exactly \
                               the dynamism the opponent wanted to protect.",
            animation_tag: "tunneling",
        },
    ],
};
