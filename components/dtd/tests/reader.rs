use assert_matches::assert_matches;

use xml_dtd::{
    AttType, ContentParticle, ContentSpec, DefaultDecl, Dtd, Occurrence, Particle, Reason,
};

const ARTICLE: &str = include_str!("data/article.dtd");

fn model<'a>(dtd: &'a Dtd, name: &str) -> &'a ContentParticle {
    match dtd.element(name).unwrap().content() {
        ContentSpec::Model(model) => model,
        spec => panic!("expected content model for {}, got {:?}", name, spec),
    }
}

#[test]
fn elements_in_declaration_order() {
    let dtd = Dtd::parse(ARTICLE).unwrap();
    let names: Vec<&str> = dtd.elements().iter().map(|el| el.name()).collect();
    assert_eq!(
        vec!["article", "front", "title", "author", "section", "para", "figure", "em", "code", "back"],
        names
    );
}

#[test]
fn content_models() {
    let dtd = Dtd::parse(ARTICLE).unwrap();

    assert_eq!(
        &ContentParticle::seq(
            ContentParticle::element("front"),
            ContentParticle::seq(
                ContentParticle::element("section").with_occurrence(Occurrence::OneOrMore),
                ContentParticle::element("back").with_occurrence(Occurrence::Optional),
            ),
        ),
        model(&dtd, "article")
    );

    let section = model(&dtd, "section");
    match section.particle() {
        Particle::Seq(title, rest) => {
            assert_eq!(&ContentParticle::element("title"), title.as_ref());
            assert!(rest.is_choice());
            assert_eq!(Occurrence::ZeroOrMore, rest.occurrence());
        }
        particle => panic!("expected sequence, got {:?}", particle),
    }

    assert_eq!(&ContentParticle::mixed(["em", "code"]), model(&dtd, "para"));
    assert_eq!(&ContentParticle::pcdata(), model(&dtd, "author"));
    assert!(dtd.element("figure").unwrap().is_empty());
    assert_eq!(&ContentSpec::Any, dtd.element("back").unwrap().content());
}

#[test]
fn attributes() {
    let dtd = Dtd::parse(ARTICLE).unwrap();

    let article = dtd.element("article").unwrap();
    assert_eq!(3, article.attributes().len());
    assert!(article.attribute("id").unwrap().is_required());
    assert_eq!(
        &DefaultDecl::Value("en".into()),
        article.attribute("lang").unwrap().default()
    );
    assert_eq!(
        &AttType::Enumeration(vec!["draft".into(), "final".into()]),
        article.attribute("status").unwrap().ty()
    );

    let figure = dtd.element("figure").unwrap();
    assert_eq!(&AttType::Entity, figure.attribute("src").unwrap().ty());
    assert!(!figure.attribute("type").unwrap().is_required());

    assert!(dtd.element("em").unwrap().attributes().is_empty());
}

#[test]
fn from_reader() {
    let dtd = Dtd::from_reader(ARTICLE.as_bytes()).unwrap();
    assert_eq!(Dtd::parse(ARTICLE).unwrap(), dtd);
}

#[test]
fn error_position() {
    let err = Dtd::parse("<!ELEMENT a (b, c)>\n<!ELEMENT b (#PCDATA | c)>").unwrap_err();
    assert_matches!(err.reason(), Reason::MixedContentNotRepeated);
    assert_eq!(Some((2, 26)), err.position());
    assert_eq!(
        "mixed content with element names must end with `)*` at 2:26",
        err.to_string()
    );
}

#[test]
fn unsupported_constructs() {
    assert_matches!(
        Dtd::parse("<!ENTITY % common SYSTEM 'common.ent'>\n%common;")
            .unwrap_err()
            .reason(),
        Reason::ParameterEntityReference
    );
    assert_matches!(
        Dtd::parse("<![IGNORE[ <!ELEMENT a EMPTY> ]]>")
            .unwrap_err()
            .reason(),
        Reason::ConditionalSection
    );
}
