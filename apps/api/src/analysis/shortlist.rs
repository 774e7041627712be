use crate::models::catalog::JobCatalog;
use crate::models::profile::Profile;

/// Catalog titles, in catalog order, that share at least one required or preferred
/// skill with the profile's technical skills.
pub fn shortlist_titles(profile: &Profile, catalog: &JobCatalog) -> Vec<String> {
    catalog
        .roles()
        .iter()
        .filter(|role| {
            role.required_skills
                .iter()
                .chain(role.preferred_skills.iter())
                .any(|skill| profile.has_technical_skill(skill))
        })
        .map(|role| role.title.clone())
        .collect()
}
