use crate::quiz::{MultipleChoiceQuestion, MultipleChoiceQuiz, QuizError};

/// Nervous, endocrine and immune systems.
///
/// # Errors
///
/// Only fails if the bank itself is malformed.
pub fn biology() -> Result<MultipleChoiceQuiz, QuizError> {
    MultipleChoiceQuiz::new(vec![
        MultipleChoiceQuestion::new(
            "Imagine you step on a sharp object. Which sequence best describes the reflex pathway involved in quickly lifting your foot?",
            [
                "Foot receptor -> Brain -> Spinal Cord -> Leg Muscle",
                "Foot receptor -> Sensory Neuron -> Spinal Cord (Interneuron) -> Motor Neuron -> Leg Muscle",
                "Brain -> Motor Neuron -> Foot Receptor -> Leg Muscle",
                "Foot receptor -> Sensory Neuron -> Brain -> Motor Neuron -> Leg Muscle",
            ],
            "Foot receptor -> Sensory Neuron -> Spinal Cord (Interneuron) -> Motor Neuron -> Leg Muscle",
        ),
        MultipleChoiceQuestion::new(
            "Why is a reflex action typically faster than a conscious decision to move?",
            [
                "Reflexes use chemical signals while conscious actions use electrical signals.",
                "Conscious actions involve more neurons and processing time in the brain.",
                "Reflex pathways bypass receptors and effectors.",
                "Motor neurons are faster than sensory neurons only during reflexes.",
            ],
            "Conscious actions involve more neurons and processing time in the brain.",
        ),
        MultipleChoiceQuestion::new(
            "The myelin sheath, which covers parts of some neurons, plays a crucial role in:",
            [
                "Detecting stimuli directly.",
                "Releasing neurotransmitters into the synapse.",
                "Increasing the speed of electrical signal transmission along the axon.",
                "Connecting the neuron directly to muscles or glands.",
            ],
            "Increasing the speed of electrical signal transmission along the axon.",
        ),
        MultipleChoiceQuestion::new(
            "Which type of neuron carries signals from the CNS to muscles or glands, causing a response?",
            ["Sensory Neuron", "Interneuron (Relay Neuron)", "Motor Neuron", "Receptor Neuron"],
            "Motor Neuron",
        ),
        MultipleChoiceQuestion::new(
            "Coordination and fine-tuning of complex movements like playing piano rely heavily on the:",
            ["Cerebrum", "Hypothalamus", "Cerebellum", "Pituitary Gland"],
            "Cerebellum",
        ),
        MultipleChoiceQuestion::new(
            "Hormones travel throughout the bloodstream, but only affect specific target cells. Why?",
            [
                "Hormones are only released near their target cells.",
                "Target cells have specific receptors that match the shape of the hormone.",
                "Non-target cells actively destroy hormones.",
                "The bloodstream only carries hormones to certain parts of the body.",
            ],
            "Target cells have specific receptors that match the shape of the hormone.",
        ),
        MultipleChoiceQuestion::new(
            "If blood glucose levels become too high, the pancreas releases ______, which signals cells to ______ glucose.",
            ["Glucagon; release", "Insulin; take up", "Adrenaline; ignore", "Thyroid hormone; store as fat"],
            "Insulin; take up",
        ),
        MultipleChoiceQuestion::new(
            "Which gland produces hormones that regulate the body's metabolism?",
            ["Adrenal Glands", "Pancreas", "Thyroid Gland", "Testes/Ovaries"],
            "Thyroid Gland",
        ),
        MultipleChoiceQuestion::new(
            "Compared to the nervous system, messages sent by the endocrine system are generally:",
            [
                "Faster acting and shorter lasting",
                "Slower acting and longer lasting",
                "Transmitted electrically",
                "Targeted only to adjacent cells",
            ],
            "Slower acting and longer lasting",
        ),
        MultipleChoiceQuestion::new(
            "Maintaining a stable internal environment, such as body temperature, is called:",
            ["Reflex arc", "Stimulus-response", "Homeostasis", "Synaptic transmission"],
            "Homeostasis",
        ),
        MultipleChoiceQuestion::new(
            "Which of the following causes infectious disease by replicating inside host cells?",
            ["Bacteria", "Fungi", "Viruses", "Allergens"],
            "Viruses",
        ),
        MultipleChoiceQuestion::new(
            "Besides the skin, what is another example of a first-line defence barrier against pathogens?",
            [
                "Antibodies",
                "Inflammation",
                "Mucous membranes lining airways",
                "Memory B cells",
            ],
            "Mucous membranes lining airways",
        ),
        MultipleChoiceQuestion::new(
            "What is the primary advantage of the third line of defence (specific immunity)?",
            [
                "It acts faster than the first line of defence.",
                "It creates memory, allowing a faster and stronger response on re-exposure to the same pathogen.",
                "It uses physical barriers like skin.",
                "It causes inflammation to trap pathogens.",
            ],
            "It creates memory, allowing a faster and stronger response on re-exposure to the same pathogen.",
        ),
        MultipleChoiceQuestion::new(
            "Vaccines protect individuals and populations by:",
            [
                "Providing antibodies directly from another person.",
                "Strengthening the skin barrier.",
                "Killing all bacteria in the body.",
                "Triggering the immune system to develop memory cells against a specific pathogen without causing significant illness.",
            ],
            "Triggering the immune system to develop memory cells against a specific pathogen without causing significant illness.",
        ),
        MultipleChoiceQuestion::new(
            "Handwashing, sanitation and quarantine are crucial public health measures primarily because they:",
            [
                "Boost the third line of immune defence.",
                "Reduce the transmission of pathogens between individuals.",
                "Increase the effectiveness of antibiotics.",
                "Directly stimulate hormone production.",
            ],
            "Reduce the transmission of pathogens between individuals.",
        ),
    ])
}
