/// Canned reply for a chat message.
///
/// A keyword lookup over a handful of well-known topics, falling through to
/// a generic reply that echoes the question. Matching is case-insensitive;
/// singular keywords also cover their plurals.
pub fn generate_reply(message: &str) -> String {
    let lowercase = message.to_lowercase();

    if lowercase.contains("genesis") || lowercase.contains("creation") {
        "Genesis is the first book of the Bible. It begins with the story of creation: \
         'In the beginning God created the heavens and the earth.'"
            .to_string()
    } else if lowercase.contains("jesus") || lowercase.contains("christ") {
        "Jesus Christ is the central figure of Christianity. The New Testament records \
         his birth, ministry, death, and resurrection."
            .to_string()
    } else if lowercase.contains("commandment") {
        "The Ten Commandments are a set of biblical principles relating to ethics and \
         worship. They include commands to worship only God, honor one's parents, and \
         prohibitions against idolatry, blasphemy, murder, theft, dishonesty, and adultery."
            .to_string()
    } else if lowercase.contains("psalm") {
        "The Book of Psalms is a collection of religious songs and prayers. Psalm 23 is \
         one of the most well-known: 'The Lord is my shepherd; I shall not want.'"
            .to_string()
    } else {
        format!(
            "Thank you for your question about \"{}\". In a complete implementation, this \
             would connect to a more sophisticated AI service that could provide detailed \
             biblical insights and references.",
            message
        )
    }
}
