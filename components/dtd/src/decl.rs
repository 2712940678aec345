//! Declarations of a DTD

/// Element type declaration merged with its attribute-list declarations
#[derive(Clone, Debug, PartialEq)]
pub struct ElementDecl {
    name: String,
    content: ContentSpec,
    attributes: Vec<AttributeDecl>,
}

impl ElementDecl {
    pub fn new(name: impl Into<String>, content: ContentSpec) -> Self {
        Self {
            name: name.into(),
            content,
            attributes: vec![],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &ContentSpec {
        &self.content
    }

    pub fn attributes(&self) -> &[AttributeDecl] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeDecl> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// Declared as `EMPTY`
    pub fn is_empty(&self) -> bool {
        matches!(self.content, ContentSpec::Empty)
    }

    pub(crate) fn push_attribute(&mut self, attribute: AttributeDecl) {
        self.attributes.push(attribute);
    }
}

/// `contentspec ::= 'EMPTY' | 'ANY' | Mixed | children`
#[derive(Clone, Debug, PartialEq)]
pub enum ContentSpec {
    Empty,
    Any,
    /// Mixed content or element content
    Model(ContentParticle),
}

/// Node of a content model tree
///
/// Groups with more than two members are nested to the right, so `(a, b, c)`
/// becomes `Seq(a, Seq(b, c))`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentParticle {
    particle: Particle,
    occurrence: Occurrence,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Particle {
    Element(String),
    /// `#PCDATA`
    PcData,
    Seq(Box<ContentParticle>, Box<ContentParticle>),
    Choice(Box<ContentParticle>, Box<ContentParticle>),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Occurrence {
    Once,
    /// `?`
    Optional,
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
}

impl Occurrence {
    /// Occurrence of a group with a single member
    ///
    /// `(a?)+` accepts the same as `a*`.
    pub fn combine(self, outer: Occurrence) -> Occurrence {
        match (self, outer) {
            (Occurrence::Once, outer) => outer,
            (inner, Occurrence::Once) => inner,
            (inner, outer) if inner == outer => inner,
            _ => Occurrence::ZeroOrMore,
        }
    }
}

impl ContentParticle {
    pub fn new(particle: Particle, occurrence: Occurrence) -> Self {
        Self {
            particle,
            occurrence,
        }
    }

    pub fn element(name: impl Into<String>) -> Self {
        Self::new(Particle::Element(name.into()), Occurrence::Once)
    }

    pub fn pcdata() -> Self {
        Self::new(Particle::PcData, Occurrence::Once)
    }

    pub fn seq(left: ContentParticle, right: ContentParticle) -> Self {
        Self::new(
            Particle::Seq(Box::new(left), Box::new(right)),
            Occurrence::Once,
        )
    }

    pub fn choice(left: ContentParticle, right: ContentParticle) -> Self {
        Self::new(
            Particle::Choice(Box::new(left), Box::new(right)),
            Occurrence::Once,
        )
    }

    /// `(#PCDATA | name ...)*`, or `(#PCDATA)` without names
    pub fn mixed<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<ContentParticle> = names.into_iter().map(Self::element).collect();
        if names.is_empty() {
            return Self::pcdata();
        }
        Self::nest(Self::pcdata(), names, Self::choice).with_occurrence(Occurrence::ZeroOrMore)
    }

    /// Join group members with `join`, nesting to the right
    pub(crate) fn nest(
        first: ContentParticle,
        rest: Vec<ContentParticle>,
        join: fn(ContentParticle, ContentParticle) -> ContentParticle,
    ) -> ContentParticle {
        let mut members = rest.into_iter().rev();
        match members.next() {
            Some(last) => {
                let right = members.fold(last, |right, left| join(left, right));
                join(first, right)
            }
            None => first,
        }
    }

    pub fn with_occurrence(mut self, occurrence: Occurrence) -> Self {
        self.occurrence = occurrence;
        self
    }

    pub fn particle(&self) -> &Particle {
        &self.particle
    }

    pub fn occurrence(&self) -> Occurrence {
        self.occurrence
    }

    pub fn is_seq(&self) -> bool {
        matches!(self.particle, Particle::Seq(..))
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.particle, Particle::Choice(..))
    }

    pub fn is_pcdata(&self) -> bool {
        matches!(self.particle, Particle::PcData)
    }
}

/// Attribute definition of an `ATTLIST` declaration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeDecl {
    name: String,
    ty: AttType,
    default: DefaultDecl,
}

impl AttributeDecl {
    pub fn new(name: impl Into<String>, ty: AttType, default: DefaultDecl) -> Self {
        Self {
            name: name.into(),
            ty,
            default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &AttType {
        &self.ty
    }

    pub fn default(&self) -> &DefaultDecl {
        &self.default
    }

    pub fn is_required(&self) -> bool {
        matches!(self.default, DefaultDecl::Required)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttType {
    CData,
    Id,
    IdRef,
    IdRefs,
    Entity,
    Entities,
    NmToken,
    NmTokens,
    Notation(Vec<String>),
    Enumeration(Vec<String>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DefaultDecl {
    Required,
    Implied,
    Fixed(String),
    Value(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nest_is_right_associative() {
        let seq = ContentParticle::nest(
            ContentParticle::element("a"),
            vec![ContentParticle::element("b"), ContentParticle::element("c")],
            ContentParticle::seq,
        );
        assert_eq!(
            ContentParticle::seq(
                ContentParticle::element("a"),
                ContentParticle::seq(ContentParticle::element("b"), ContentParticle::element("c")),
            ),
            seq
        );
    }

    #[test]
    fn mixed_content() {
        assert_eq!(ContentParticle::pcdata(), ContentParticle::mixed(Vec::<String>::new()));
        assert_eq!(
            ContentParticle::choice(
                ContentParticle::pcdata(),
                ContentParticle::choice(ContentParticle::element("a"), ContentParticle::element("b")),
            )
            .with_occurrence(Occurrence::ZeroOrMore),
            ContentParticle::mixed(["a", "b"])
        );
    }

    #[test]
    fn combine_occurrences() {
        use Occurrence::*;
        assert_eq!(Optional, Once.combine(Optional));
        assert_eq!(OneOrMore, OneOrMore.combine(Once));
        assert_eq!(OneOrMore, OneOrMore.combine(OneOrMore));
        assert_eq!(ZeroOrMore, Optional.combine(OneOrMore));
        assert_eq!(ZeroOrMore, OneOrMore.combine(Optional));
    }
}
