use super::{error::StorageError, Storage};
use crate::{
    dtos::{
        directorydtos::{CreateAgentDto, CreateTestimonialDto},
        neighborhooddtos::{
            CreateAmenityCategoryDto, CreateAmenityDto, CreateNeighborhoodAmenityDto,
            CreateNeighborhoodDto,
        },
        propertydtos::CreatePropertyDto,
        userdtos::CreateUserDto,
    },
    models::{propertymodel::ListingType, usermodel::UserType},
    utils::password,
};

/// Row counts written by [`seed_sample_data`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub properties: usize,
    pub agents: usize,
    pub testimonials: usize,
    pub amenity_categories: usize,
    pub neighborhoods: usize,
    pub amenities: usize,
    pub property_neighborhoods: usize,
    pub neighborhood_amenities: usize,
}

struct SampleProperty {
    title: &'static str,
    description: &'static str,
    price: i32,
    location: &'static str,
    city: &'static str,
    state: &'static str,
    bedrooms: i32,
    bathrooms: i32,
    square_feet: i32,
    property_type: &'static str,
    listing_type: ListingType,
    is_featured: bool,
    is_new: bool,
    image_url: &'static str,
    latitude: f64,
    longitude: f64,
}

const SAMPLE_PROPERTIES: [SampleProperty; 6] = [
    SampleProperty {
        title: "Luxury Penthouse",
        description: "Spectacular penthouse with panoramic views of the Lusaka skyline",
        price: 18_500_000,
        location: "Kabulonga, Lusaka",
        city: "Lusaka",
        state: "Lusaka Province",
        bedrooms: 4,
        bathrooms: 3,
        square_feet: 2850,
        property_type: "Penthouse",
        listing_type: ListingType::Sell,
        is_featured: true,
        is_new: false,
        image_url: "https://images.unsplash.com/photo-1613490493576-7fde63acd811?auto=format&fit=crop&w=1171&q=80",
        latitude: -15.3875259,
        longitude: 28.3228303,
    },
    SampleProperty {
        title: "Modern Villa",
        description: "Stunning modern villa with minimalist design and luxurious finishes",
        price: 25_000_000,
        location: "Ibex Hill, Lusaka",
        city: "Lusaka",
        state: "Lusaka Province",
        bedrooms: 6,
        bathrooms: 5,
        square_feet: 5400,
        property_type: "Villa",
        listing_type: ListingType::Sell,
        is_featured: true,
        is_new: false,
        image_url: "https://images.unsplash.com/photo-1583608205776-bfd35f0d9f83?auto=format&fit=crop&w=1170&q=80",
        latitude: -15.3521,
        longitude: 28.4153,
    },
    SampleProperty {
        title: "Zambezi Riverfront Estate",
        description: "Breathtaking riverfront estate with private access to the Zambezi River",
        price: 35_000_000,
        location: "Livingstone",
        city: "Livingstone",
        state: "Southern Province",
        bedrooms: 5,
        bathrooms: 6,
        square_feet: 6200,
        property_type: "Estate",
        listing_type: ListingType::Sell,
        is_featured: true,
        is_new: true,
        image_url: "https://images.unsplash.com/photo-1512917774080-9991f1c4c750?auto=format&fit=crop&w=1170&q=80",
        latitude: -17.8516,
        longitude: 25.8566,
    },
    SampleProperty {
        title: "Contemporary Mansion",
        description: "Impressive contemporary mansion with smart home technology throughout",
        price: 42_000_000,
        location: "Leopards Hill, Lusaka",
        city: "Lusaka",
        state: "Lusaka Province",
        bedrooms: 7,
        bathrooms: 8,
        square_feet: 9800,
        property_type: "Mansion",
        listing_type: ListingType::Sell,
        is_featured: false,
        is_new: true,
        image_url: "https://images.unsplash.com/photo-1600607687939-ce8a6c25118c?auto=format&fit=crop&w=2053&q=80",
        latitude: -15.4112,
        longitude: 28.3370,
    },
    SampleProperty {
        title: "Luxury City Apartment",
        description: "Beautifully designed luxury apartment in the heart of Lusaka's business district",
        price: 9_800_000,
        location: "Cairo Road, Lusaka",
        city: "Lusaka",
        state: "Lusaka Province",
        bedrooms: 3,
        bathrooms: 2,
        square_feet: 1800,
        property_type: "Apartment",
        listing_type: ListingType::Rent,
        is_featured: false,
        is_new: false,
        image_url: "https://images.unsplash.com/photo-1625602812206-5ec545ca1231?auto=format&fit=crop&w=1170&q=80",
        latitude: -15.4174,
        longitude: 28.2876,
    },
    SampleProperty {
        title: "Safari Lodge Investment",
        description: "Commercial safari lodge with stunning views of the wildlife and natural landscape",
        price: 28_500_000,
        location: "South Luangwa National Park",
        city: "Mfuwe",
        state: "Eastern Province",
        bedrooms: 12,
        bathrooms: 14,
        square_feet: 8500,
        property_type: "Commercial",
        listing_type: ListingType::Sell,
        is_featured: false,
        is_new: false,
        image_url: "https://images.unsplash.com/photo-1605276374104-dee2a0ed3cd6?auto=format&fit=crop&w=1170&q=80",
        latitude: -13.1467,
        longitude: 31.7865,
    },
];

// (name, title, bio, image, instagram, linkedin, email)
const SAMPLE_AGENTS: [(&str, &str, &str, &str, &str, &str, &str); 4] = [
    (
        "David Wantula Makungu",
        "Principal Agent & Owner",
        "With over 15 years of experience in Zambian real estate, specializing in luxury properties across major cities.",
        "https://images.unsplash.com/photo-1560250097-0b93528c311a?auto=format&fit=crop&w=687&q=80",
        "davidmakungu",
        "david-makungu",
        "david@realtyestate.com",
    ),
    (
        "Natasha Mwansa",
        "International Properties",
        "Specializing in connecting international investors with premium Zambian real estate opportunities.",
        "https://images.unsplash.com/photo-1573496359142-b8d87734a5a2?auto=format&fit=crop&w=688&q=80",
        "natashamwansa",
        "natasha-mwansa",
        "natasha@realtyestate.com",
    ),
    (
        "Mulenga Chipimo",
        "Investment Advisor",
        "Former Bank of Zambia financial analyst helping clients build valuable real estate portfolios across Zambia.",
        "https://images.unsplash.com/photo-1519085360753-af0119f7cbe7?auto=format&fit=crop&w=687&q=80",
        "mulengachipimo",
        "mulenga-chipimo",
        "mulenga@realtyestate.com",
    ),
    (
        "Chilufya Banda",
        "Commercial Property Expert",
        "Specialized knowledge of commercial developments in Lusaka and the Copperbelt regions.",
        "https://images.unsplash.com/photo-1551836022-d5d88e9218df?auto=format&fit=crop&w=687&q=80",
        "chilufyabanda",
        "chilufya-banda",
        "chilufya@realtyestate.com",
    ),
];

// (quote, name, location, rating, image)
const SAMPLE_TESTIMONIALS: [(&str, &str, &str, i32, &str); 3] = [
    (
        "Realty Estate provided exceptional service in helping us find our dream home in Lusaka. David's personal attention to detail and understanding of our needs made the process seamless.",
        "Mutale Kapaso",
        "Lusaka, Zambia",
        5,
        "https://images.unsplash.com/photo-1580489944761-15a19d654956?auto=format&fit=crop&w=761&q=80",
    ),
    (
        "As an international investor, I was impressed by Realty Estate's expertise in the Zambian market. They helped me secure premium properties in Lusaka that have already appreciated in value.",
        "James Phiri",
        "London, UK (Zambian expatriate)",
        5,
        "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?auto=format&fit=crop&w=687&q=80",
    ),
    (
        "The exclusive access to off-market properties through Realty Estate gave us a competitive edge. We found a stunning Zambezi riverfront property before it was publicly listed.",
        "Bwalya & Namwinga Tembo",
        "Livingstone, Zambia",
        5,
        "https://images.unsplash.com/photo-1529626455594-4ff0802cfb7e?auto=format&fit=crop&w=687&q=80",
    ),
];

const SAMPLE_CATEGORIES: [(&str, &str); 6] = [
    ("Schools", "school"),
    ("Healthcare", "hospital"),
    ("Shopping", "shopping-bag"),
    ("Restaurants", "utensils"),
    ("Parks", "tree"),
    ("Transport", "bus"),
];

// (name, city, description, safety, walkability, schools, lat, lng).
// Neighborhood i borrows the cover image of sample property i.
const SAMPLE_NEIGHBORHOODS: [(&str, &str, &str, i32, i32, i32, f64, f64); 6] = [
    (
        "Kabulonga",
        "Lusaka",
        "Leafy, upmarket suburb east of the city centre with embassies, cafes and international schools.",
        85, 70, 90, -15.4040, 28.3320,
    ),
    (
        "Ibex Hill",
        "Lusaka",
        "Quiet hillside suburb of large plots and executive homes.",
        88, 45, 80, -15.4290, 28.3820,
    ),
    (
        "Livingstone",
        "Livingstone",
        "Tourism capital on the Zambezi, minutes from Victoria Falls.",
        78, 68, 72, -17.8419, 25.8544,
    ),
    (
        "Leopards Hill",
        "Lusaka",
        "Semi-rural estates on the south-eastern edge of Lusaka, close to the national park.",
        82, 35, 78, -15.4380, 28.3650,
    ),
    (
        "Cairo Road",
        "Lusaka",
        "The central business district: offices, banks, markets and the main bus terminus.",
        65, 92, 70, -15.4174, 28.2876,
    ),
    (
        "Mfuwe",
        "Mfuwe",
        "Gateway village to South Luangwa National Park.",
        80, 30, 55, -13.0840, 31.7870,
    ),
];

// (name, category index, address, lat, lng)
const SAMPLE_AMENITIES: [(&str, usize, &str, f64, f64); 10] = [
    ("International School of Lusaka", 0, "Nangwenya Road, Lusaka", -15.3947, 28.3260),
    ("Levy Junction Mall", 2, "Church Road, Lusaka", -15.4137, 28.2905),
    ("Lusaka Trust Hospital", 1, "Nsumbu Road, Woodlands, Lusaka", -15.4230, 28.3190),
    ("East Park Mall", 2, "Great East Road, Lusaka", -15.3960, 28.3290),
    ("Lusaka National Park", 4, "Leopards Hill Road, Lusaka", -15.5240, 28.4290),
    ("Victoria Falls", 4, "Mosi-oa-Tunya Road, Livingstone", -17.9243, 25.8572),
    ("Livingstone General Hospital", 1, "Akapelwa Street, Livingstone", -17.8470, 25.8610),
    ("Mfuwe Airport", 5, "Mfuwe", -13.2589, 31.9366),
    ("Intercity Bus Terminus", 5, "Dedan Kimathi Road, Lusaka", -15.4197, 28.2838),
    ("The Deli Kabulonga", 3, "Kabulonga Road, Lusaka", -15.4035, 28.3330),
];

// (neighborhood index, amenity index, distance km)
const SAMPLE_NEIGHBORHOOD_AMENITIES: [(usize, usize, f64); 16] = [
    (0, 0, 1.2),
    (0, 2, 2.0),
    (0, 3, 1.5),
    (0, 9, 0.4),
    (1, 0, 4.1),
    (1, 3, 5.3),
    (1, 4, 13.2),
    (3, 0, 2.3),
    (3, 2, 3.0),
    (3, 4, 12.5),
    (4, 1, 0.6),
    (4, 8, 0.8),
    (4, 2, 4.7),
    (2, 5, 8.1),
    (2, 6, 0.5),
    (5, 7, 15.2),
];

/// Writes the sample marketplace through the storage contract, so it works
/// on any backend. Cross-entity links are wired by position in the created
/// id lists. Running it twice duplicates everything.
pub async fn seed_sample_data(storage: &dyn Storage) -> Result<SeedSummary, StorageError> {
    let mut summary = SeedSummary::default();

    let admin = storage
        .create_user(sample_user(
            "admin",
            "admin123",
            "admin@example.com",
            "Admin User",
            UserType::LandlordAndSell,
        )?)
        .await?;
    storage
        .create_user(sample_user(
            "test",
            "test123",
            "test@example.com",
            "Test User",
            UserType::RentAndBuy,
        )?)
        .await?;
    summary.users = 2;

    let mut property_ids = Vec::with_capacity(SAMPLE_PROPERTIES.len());
    for sample in SAMPLE_PROPERTIES.iter() {
        let property = storage
            .create_property(CreatePropertyDto {
                owner_id: admin.id,
                title: sample.title.to_string(),
                description: sample.description.to_string(),
                price: sample.price,
                location: sample.location.to_string(),
                city: sample.city.to_string(),
                state: sample.state.to_string(),
                latitude: Some(sample.latitude),
                longitude: Some(sample.longitude),
                bedrooms: sample.bedrooms,
                bathrooms: sample.bathrooms,
                square_feet: sample.square_feet,
                property_type: sample.property_type.to_string(),
                listing_type: sample.listing_type,
                status: None,
                is_featured: Some(sample.is_featured),
                is_new: Some(sample.is_new),
                image_url: sample.image_url.to_string(),
                additional_images: None,
            })
            .await?;
        property_ids.push(property.id);
    }
    summary.properties = property_ids.len();

    for (name, title, bio, image_url, instagram, linkedin, email) in SAMPLE_AGENTS {
        storage
            .create_agent(CreateAgentDto {
                name: name.to_string(),
                title: title.to_string(),
                bio: bio.to_string(),
                image_url: image_url.to_string(),
                instagram: Some(instagram.to_string()),
                linkedin: Some(linkedin.to_string()),
                email: email.to_string(),
            })
            .await?;
        summary.agents += 1;
    }

    for (quote, name, location, rating, image_url) in SAMPLE_TESTIMONIALS {
        storage
            .create_testimonial(CreateTestimonialDto {
                quote: quote.to_string(),
                name: name.to_string(),
                location: location.to_string(),
                rating,
                image_url: image_url.to_string(),
            })
            .await?;
        summary.testimonials += 1;
    }

    let mut category_ids = Vec::with_capacity(SAMPLE_CATEGORIES.len());
    for (name, icon) in SAMPLE_CATEGORIES {
        let category = storage
            .create_amenity_category(CreateAmenityCategoryDto {
                name: name.to_string(),
                icon: icon.to_string(),
            })
            .await?;
        category_ids.push(category.id);
    }
    summary.amenity_categories = category_ids.len();

    let mut neighborhood_ids = Vec::with_capacity(SAMPLE_NEIGHBORHOODS.len());
    for (index, (name, city, description, safety, walkability, schools, latitude, longitude)) in
        SAMPLE_NEIGHBORHOODS.into_iter().enumerate()
    {
        let neighborhood = storage
            .create_neighborhood(CreateNeighborhoodDto {
                name: name.to_string(),
                city: city.to_string(),
                description: description.to_string(),
                safety_rating: safety,
                walkability_score: walkability,
                school_rating: schools,
                image_url: SAMPLE_PROPERTIES[index].image_url.to_string(),
                latitude,
                longitude,
            })
            .await?;
        neighborhood_ids.push(neighborhood.id);
    }
    summary.neighborhoods = neighborhood_ids.len();

    let mut amenity_ids = Vec::with_capacity(SAMPLE_AMENITIES.len());
    for (name, category, address, latitude, longitude) in SAMPLE_AMENITIES {
        let amenity = storage
            .create_amenity(CreateAmenityDto {
                name: name.to_string(),
                category_id: category_ids[category],
                address: address.to_string(),
                description: String::new(),
                image_url: String::new(),
                website: String::new(),
                phone_number: String::new(),
                latitude,
                longitude,
            })
            .await?;
        amenity_ids.push(amenity.id);
    }
    summary.amenities = amenity_ids.len();

    for (property_id, neighborhood_id) in property_ids.iter().zip(neighborhood_ids.iter()) {
        storage
            .add_property_to_neighborhood(*property_id, *neighborhood_id)
            .await?;
        summary.property_neighborhoods += 1;
    }

    for (neighborhood, amenity, distance) in SAMPLE_NEIGHBORHOOD_AMENITIES {
        storage
            .add_amenity_to_neighborhood(CreateNeighborhoodAmenityDto {
                neighborhood_id: neighborhood_ids[neighborhood],
                amenity_id: amenity_ids[amenity],
                distance,
            })
            .await?;
        summary.neighborhood_amenities += 1;
    }

    tracing::info!(
        "seeded {} users, {} properties, {} neighborhoods and {} amenities",
        summary.users,
        summary.properties,
        summary.neighborhoods,
        summary.amenities
    );
    Ok(summary)
}

/// Seeds only a store with no users. Returns whether it seeded.
pub async fn populate_if_empty(storage: &dyn Storage) -> Result<bool, StorageError> {
    let users = storage.get_user_count().await?;
    if users > 0 {
        tracing::info!("store already has {} users, skipping sample data", users);
        return Ok(false);
    }

    seed_sample_data(storage).await?;
    Ok(true)
}

fn sample_user(
    username: &str,
    plain_password: &str,
    email: &str,
    full_name: &str,
    user_type: UserType,
) -> Result<CreateUserDto, StorageError> {
    let hashed = password::hash(plain_password)
        .map_err(|e| StorageError::Backend(format!("hashing sample password: {}", e)))?;

    Ok(CreateUserDto {
        username: username.to_string(),
        password: hashed,
        email: email.to_string(),
        full_name: full_name.to_string(),
        user_type,
        phone_number: None,
        bio: None,
        profile_image: None,
    })
}
